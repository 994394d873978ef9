//! Background export tasks: submit, poll, download, expire.
//!
//! Exports run outside the request/response cycle. Submission inserts a
//! `Processing` entry into a concurrent in-memory registry and spawns a
//! worker; clients poll status until terminal. Entries live for a fixed
//! TTL and are reaped regardless of status — a completed report that was
//! never downloaded is purged too. Bounded memory is the point; nothing
//! here survives a restart.

pub mod manager;
pub mod reaper;
pub mod store;
pub mod task;

pub use manager::ExportTaskManager;
pub use reaper::{spawn_reaper, spawn_reaper_with_interval};
pub use store::{InMemoryTaskStore, TaskStore};
pub use task::{ExportStatus, ExportTask, ExportTaskResponse};
