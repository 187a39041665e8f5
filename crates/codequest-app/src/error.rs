//! CodeQuest terminal driver: startup error types.

use codequest_catalog::domain::bank::BankError;
use thiserror::Error;

/// Startup and runtime errors for the terminal driver.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The built-in problem bank failed to load.
    #[error("problem bank error: {0}")]
    Bank(#[from] BankError),

    /// An HTTP client could not be built.
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Terminal I/O failed.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
