use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Published once per submitted application, after the submitting
/// transaction commits. Identifies what needs scoring and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationMatchEvent {
    pub application_id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
}
