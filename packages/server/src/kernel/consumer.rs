//! Bus subjects and the consumer driver loop.
//!
//! Each pipeline stage is a plain handler returning `anyhow::Result<()>`.
//! The driver loop owns the "never crash the consumer" contract: it logs
//! every handler error and moves on to the next message, so a poison
//! message or a transient collaborator failure costs exactly one event
//! (at-most-effort, no retry, no dead-letter).
//!
//! ```text
//! upply.applications.match-calc ──► MatchCalcConsumer
//! upply.notifications.events ─────► NotificationOrchestrator
//!                                        │ per (event, channel)
//! upply.notifications.dispatch.<user_id> ──► DispatchConsumer
//! ```

use anyhow::Result;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{error, info};

/// Bus subjects consumed and produced by the pipeline.
///
/// Producers publish to these only after their originating transaction
/// commits; a rolled-back application must never emit an event.
pub mod subjects {
    use uuid::Uuid;

    /// Match-calc events, produced once per submitted application.
    pub const APPLICATION_MATCH_CALC: &str = "upply.applications.match-calc";

    /// Domain notification events, consumed by the orchestrator.
    pub const NOTIFICATION_EVENTS: &str = "upply.notifications.events";

    /// Channel-ready dispatch payloads, one subject token per user so the
    /// bus preserves per-user ordering (nothing is ordered across users).
    pub const NOTIFICATION_DISPATCH_WILDCARD: &str = "upply.notifications.dispatch.*";

    /// Dispatch subject for a single user.
    pub fn notification_dispatch(user_id: Uuid) -> String {
        format!("upply.notifications.dispatch.{user_id}")
    }
}

/// Queue groups: one logical consumer per group, NATS balances within it.
pub mod groups {
    pub const APPLICATION_MATCHING: &str = "application-matching-group";
    pub const ORCHESTRATOR: &str = "orchestrator-group";
    pub const DISPATCH: &str = "dispatch-group";
}

/// Subscribe to `subject` within `group` and feed every message to `handler`.
///
/// Messages are processed sequentially per subscription so the bus's
/// per-subject ordering survives end-to-end. Returns when the subscription
/// stream ends (connection closed).
pub async fn run_consumer<E, H, Fut>(
    client: async_nats::Client,
    subject: &str,
    group: &str,
    handler: H,
) -> Result<()>
where
    E: DeserializeOwned,
    H: Fn(E) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut subscription = client
        .queue_subscribe(subject.to_string(), group.to_string())
        .await?;

    info!("Consumer started | subject: {} group: {}", subject, group);

    while let Some(message) = subscription.next().await {
        let event: E = match serde_json::from_slice(&message.payload) {
            Ok(event) => event,
            Err(e) => {
                error!(
                    "Dropping undecodable message on {} | reason: {}",
                    message.subject, e
                );
                continue;
            }
        };

        if let Err(e) = handler(event).await {
            error!("Handler failed on {} | reason: {:#}", subject, e);
        }
    }

    info!("Consumer stopped | subject: {} group: {}", subject, group);
    Ok(())
}
