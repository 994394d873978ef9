//! Job posting entity view, repository contract, and the export subsystem.

pub mod exports;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    /// Recruiter who owns the posting; export operations check against this.
    pub posted_by: Uuid,
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>>;
}
