//! Periodic purge of expired task entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use super::manager::ExportTaskManager;

/// How often expired entries are swept out of the registry.
pub const REAP_INTERVAL: Duration = Duration::from_secs(60);

/// Run the reaper on a fixed period until the handle is dropped or aborted.
///
/// A reaped task's worker may still be computing; its result just becomes
/// unreachable. That leaked computation is the accepted cost of keeping
/// the registry bounded.
pub fn spawn_reaper(manager: Arc<ExportTaskManager>) -> JoinHandle<()> {
    spawn_reaper_with_interval(manager, REAP_INTERVAL)
}

pub fn spawn_reaper_with_interval(
    manager: Arc<ExportTaskManager>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let removed = manager.reap();
            if removed > 0 {
                info!("Reaped {} expired export task(s)", removed);
            }
        }
    })
}
