//! Consumer for `upply.applications.match-calc`.
//!
//! Scores a freshly submitted application against its job and persists the
//! result. Any failure (missing entity, scorer error, persistence error)
//! is returned to the driver loop, which logs it and drops the event: a
//! permanently unscorable application simply keeps a null score.

use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::info;

use crate::kernel::ServerDeps;

use super::ApplicationMatchEvent;

pub struct MatchCalcConsumer {
    deps: Arc<ServerDeps>,
}

impl MatchCalcConsumer {
    pub fn new(deps: Arc<ServerDeps>) -> Self {
        Self { deps }
    }

    pub async fn handle(&self, event: ApplicationMatchEvent) -> Result<()> {
        info!(
            "Received match event for applicationId: {}",
            event.application_id
        );

        let application = self
            .deps
            .applications
            .find_by_id(event.application_id)
            .await?
            .ok_or_else(|| anyhow!("Application not found: {}", event.application_id))?;

        let user = self
            .deps
            .users
            .find_by_id(event.user_id)
            .await?
            .ok_or_else(|| anyhow!("User not found: {}", event.user_id))?;

        let job = self
            .deps
            .jobs
            .find_by_id(event.job_id)
            .await?
            .ok_or_else(|| anyhow!("Job not found: {}", event.job_id))?;

        let score = self.deps.match_scorer.score(&user, &job).await?;

        self.deps
            .applications
            .save_matching_ratio(application.id, score)
            .await?;

        info!(
            "Saved matchingRatio: {} for applicationId: {}",
            score, application.id
        );
        Ok(())
    }
}
