use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long a task entry stays reachable after submission.
pub const TASK_TTL: Duration = Duration::seconds(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportStatus {
    Processing,
    Completed,
    Failed,
}

/// A background export task entry.
///
/// `status`, `data` and `error_message` are written exactly once, by the
/// worker, after creation. Exactly one of `data` / `error_message` ends up
/// populated on a terminal task.
#[derive(Debug, Clone)]
pub struct ExportTask {
    pub task_id: Uuid,
    pub job_id: Uuid,
    pub status: ExportStatus,
    pub data: Option<Vec<u8>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expire_at: DateTime<Utc>,
}

impl ExportTask {
    pub fn new(task_id: Uuid, job_id: Uuid, ttl: Duration) -> Self {
        let created_at = Utc::now();
        Self {
            task_id,
            job_id,
            status: ExportStatus::Processing,
            data: None,
            error_message: None,
            created_at,
            expire_at: created_at + ttl,
        }
    }
}

/// What a polling client sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportTaskResponse {
    pub task_id: Uuid,
    pub status: ExportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ExportTaskResponse {
    pub fn from_task(task: &ExportTask, download_url: Option<String>) -> Self {
        Self {
            task_id: task.task_id,
            status: task.status,
            download_url,
            error_message: task.error_message.clone(),
        }
    }
}
