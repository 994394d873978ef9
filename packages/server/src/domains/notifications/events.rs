use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification delivery medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Email,
    Push,
}

/// Email templates known to the mail provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailTemplate {
    Activation,
    ResetPassword,
    JobApplicationSubmitted,
    JobApplicationUpdated,
    NewMatchedJobs,
}

impl EmailTemplate {
    /// Template file name on the provider side.
    pub fn name(&self) -> &'static str {
        match self {
            EmailTemplate::Activation => "activation",
            EmailTemplate::ResetPassword => "reset_password",
            EmailTemplate::JobApplicationSubmitted => "job_application_submitted",
            EmailTemplate::JobApplicationUpdated => "job_application_update",
            EmailTemplate::NewMatchedJobs => "new_matched_jobs",
        }
    }
}

/// Event types the template registry knows out of the box.
pub mod event_types {
    pub const JOB_APPLICATION_SUBMITTED: &str = "JOB_APPLICATION_SUBMITTED";
    pub const JOB_APPLICATION_UPDATED: &str = "JOB_APPLICATION_UPDATED";
    pub const NEW_MATCHED_JOBS: &str = "NEW_MATCHED_JOBS";
}

/// A domain notification event, published by a producer after its
/// transaction commits and consumed exactly once by the orchestrator.
///
/// `payload` is a loosely-typed bag whose expected keys depend on
/// `event_type` (e.g. `JOB_APPLICATION_SUBMITTED` carries `jobTitle`,
/// `company`, `status`). Missing keys render as blanks, never as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub event_id: Uuid,
    pub event_type: String,
    pub user_id: Uuid,
    /// Requested channels, in the producer's order. Treated as a set:
    /// the orchestrator dispatches at most once per channel.
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}
