// Upply async core
//
// This crate provides the asynchronous event/task subsystem of the Upply
// job-application platform: the notification event pipeline (domain event →
// orchestration → channel dispatch) and the in-memory background export
// task manager. Persistent storage, auth and HTTP routing live in the
// embedding server and are reached through the traits in `kernel` and
// `domains/*/data`.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
