//! Error types for the minefuzz harness.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for harness operations.
///
/// These are failures of the harness itself. Failures raised by the functions
/// under test are never surfaced through this type; they are recorded as
/// [`FailureDetail`](crate::invoke::FailureDetail) values instead.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Error preparing or clearing the sandbox directory.
    #[error("Sandbox error for '{path}': {source}")]
    Sandbox {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sandbox path holds files the harness did not create.
    #[error("Refusing to use '{0}' as a sandbox: directory is not empty and has no minefuzz marker")]
    ForeignSandbox(PathBuf),

    /// Error reading or writing a file outside the sandbox lifecycle.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record sink failed to accept a record.
    #[error("Log sink error: {0}")]
    Sink(#[source] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A generator was asked for an impossible range.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
