//! Application entity view, repository contract, and the match-calc consumer.

pub mod events;
pub mod match_consumer;

pub use events::ApplicationMatchEvent;
pub use match_consumer::MatchCalcConsumer;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub job_id: Uuid,
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    /// Match score in percent, written once by the match-calc consumer.
    /// Stays `None` forever if scoring failed (at-most-effort policy).
    pub matching_ratio: Option<f64>,
    pub applied_at: DateTime<Utc>,
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>>;

    /// All applications for a job, for the recruiter-facing export.
    async fn find_all_by_job(&self, job_id: Uuid) -> Result<Vec<Application>>;

    async fn save_matching_ratio(&self, application_id: Uuid, ratio: f64) -> Result<()>;
}
