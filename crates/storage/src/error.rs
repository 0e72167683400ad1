//! Storage and repository errors.

use doughda_core::ValidationError;
use thiserror::Error;

/// Errors from a key-value or asset backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request to blob storage failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Redis command failed.
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Blob storage answered with an unexpected status.
    #[error("unexpected status {status} for {target}")]
    UnexpectedStatus { target: String, status: u16 },

    /// A setting the backend needs was not provided.
    #[error("{0} is not configured")]
    NotConfigured(String),

    /// Key contains characters that are not allowed in a document name.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// Stored JSON could not be decoded (or encoded).
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Input failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption(err.to_string())
    }
}
