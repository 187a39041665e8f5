//! Domain and collaborator error types.

use std::time::Duration;

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Input was rejected before any collaborator was contacted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

/// Failure reported by an external collaborator (catalog, execution, story,
/// or dialogue service).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The call did not complete within its time budget.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The service could not be reached or the connection failed.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service rejected request with status {status}: {message}")]
    Rejected {
        /// HTTP-style status code.
        status: u16,
        /// Message returned by the service, if any.
        message: String,
    },

    /// The service answered but the body could not be understood.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ServiceError {
    /// Returns `true` for failures worth retrying as a fresh user action.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Transport(_) => true,
            Self::Rejected { status, .. } => *status >= 500,
            Self::MalformedResponse(_) => false,
        }
    }
}
