//! Backend adapter error types.

use thiserror::Error;

/// Errors that can occur talking to CloudVision.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("CloudVision unreachable: {0}")]
    Unavailable(String),

    #[error("CloudVision authentication failed: {0}")]
    Auth(String),

    #[error("CloudVision returned HTTP {status} for {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("failed to decode CloudVision response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },
}

impl BackendError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}

/// Convenience alias for backend results.
pub type BackendResult<T> = Result<T, BackendError>;
