//! User entity view and repository contract.
//!
//! User storage is owned by the account service; the pipeline only reads
//! the fields it needs to address notifications and score matches.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub university: Option<String>,
    /// Registered push token, if the user ever opened the mobile app.
    pub device_token: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
}
