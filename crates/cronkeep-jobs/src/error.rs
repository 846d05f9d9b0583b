//! Error types for the cronkeep-jobs crate.

use thiserror::Error;

/// All errors that can originate from job operations.
#[derive(Debug, Error)]
pub enum JobError {
    /// The schedule does not parse as a five-field cron expression.
    #[error("Invalid cron schedule: {0}")]
    InvalidSchedule(String),

    /// The command's first token does not resolve to an executable on PATH.
    #[error("Command not found on PATH: {0}")]
    CommandNotFound(String),

    /// A command or tag was rejected before it reached the crontab.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No job with the given ID exists in the crontab.
    #[error("No job found with id {id}")]
    NotFound { id: String },

    /// The crontab could not be modified with the current privileges.
    #[error("Permission denied: cannot modify the crontab")]
    PermissionDenied,

    /// Any other failure while reading or writing the crontab.
    #[error("Crontab access failed: {0}")]
    Store(String),

    /// Underlying I/O failure (spawn, pipe write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, JobError>;
