use thiserror::Error;

/// Errors surfaced by the synchronous export-task operations.
///
/// Event consumers never return these: they report failures as plain
/// `anyhow::Error` values that the consumer driver loop logs and drops.
/// These variants exist so the HTTP layer can map each failure to a
/// distinct response (404 / 403 / 409).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Operation not permitted: {0}")]
    PermissionDenied(String),

    #[error("{0}")]
    NotReady(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
