//! Errors surfaced by the practice session.

use codequest_core::error::DomainError;
use codequest_execution::application::coordinator::SubmissionError;
use thiserror::Error;

/// A learner action that could not be carried out.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    #[error("no topic selected")]
    NoTopic,

    #[error("no path chosen for this topic")]
    NoPath,

    #[error("no problem is open")]
    NoProblem,

    /// The submission was rejected before reaching the execution service.
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// Progress could not be read or recorded.
    #[error(transparent)]
    Progress(#[from] DomainError),
}
