//! Concurrent task registry behind an interface.
//!
//! The registry is the only shared mutable state in the subsystem: the
//! submission path inserts, the worker writes the terminal state, queries
//! read, and the reaper removes — all concurrently. Concurrency control
//! lives entirely inside the store; callers never lock.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::task::{ExportStatus, ExportTask};

pub trait TaskStore: Send + Sync {
    fn insert(&self, task: ExportTask);

    fn get(&self, task_id: Uuid) -> Option<ExportTask>;

    /// Transition `Processing` → `Completed` with the rendered bytes.
    /// A no-op on a task that is already terminal or gone.
    fn complete(&self, task_id: Uuid, data: Vec<u8>);

    /// Transition `Processing` → `Failed` with the captured error.
    /// A no-op on a task that is already terminal or gone.
    fn fail(&self, task_id: Uuid, error_message: String);

    /// Remove every entry whose `expire_at` has passed, regardless of
    /// status. Returns how many were removed.
    fn remove_expired(&self, now: DateTime<Utc>) -> usize;
}

/// In-memory store used in production; a durable backend can replace it
/// without changing the manager's contract.
#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, ExportTask>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TaskStore for InMemoryTaskStore {
    fn insert(&self, task: ExportTask) {
        self.tasks
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(task.task_id, task);
    }

    fn get(&self, task_id: Uuid) -> Option<ExportTask> {
        self.tasks
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&task_id)
            .cloned()
    }

    fn complete(&self, task_id: Uuid, data: Vec<u8>) {
        let mut tasks = self.tasks.write().unwrap_or_else(|e| e.into_inner());
        if let Some(task) = tasks.get_mut(&task_id) {
            if task.status == ExportStatus::Processing {
                task.data = Some(data);
                task.status = ExportStatus::Completed;
            }
        }
    }

    fn fail(&self, task_id: Uuid, error_message: String) {
        let mut tasks = self.tasks.write().unwrap_or_else(|e| e.into_inner());
        if let Some(task) = tasks.get_mut(&task_id) {
            if task.status == ExportStatus::Processing {
                task.error_message = Some(error_message);
                task.status = ExportStatus::Failed;
            }
        }
    }

    fn remove_expired(&self, now: DateTime<Utc>) -> usize {
        let mut tasks = self.tasks.write().unwrap_or_else(|e| e.into_inner());
        let before = tasks.len();
        tasks.retain(|_, task| task.expire_at > now);
        before - tasks.len()
    }
}
