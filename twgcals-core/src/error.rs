//! Error types for twgcals.

use thiserror::Error;

/// Errors that abort a sync run.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Calendar service error: {0}")]
    Calendar(String),

    #[error("Task store error: {0}")]
    TaskStore(String),

    #[error("Invalid timestamp for event '{summary}': {reason}")]
    Timestamp { summary: String, reason: String },
}

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
