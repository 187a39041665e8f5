//! Environment configuration, read once at startup.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_CATALOG_URL: &str = "http://localhost:5002";
const DEFAULT_EXECUTION_URL: &str = "http://localhost:5002/judge";
const DEFAULT_STORY_URL: &str = "http://localhost:5002";
const DEFAULT_DIALOGUE_URL: &str = "http://localhost:5002";
const DEFAULT_STATE_PATH: &str = "codequest-progress.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Service endpoints, credentials and storage location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog_url: String,
    pub execution_url: String,
    pub story_url: String,
    pub dialogue_url: String,
    /// Credential for the AI dialogue service. `None` selects the canned
    /// companion.
    pub dialogue_api_key: Option<String>,
    pub state_path: PathBuf,
    /// Default network timeout for execution and dialogue calls.
    pub http_timeout: Duration,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] naming the offending variable.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] naming the offending variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let url = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_owned());

        let http_timeout = match var("CODEQUEST_HTTP_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::Config(format!(
                        "CODEQUEST_HTTP_TIMEOUT_SECS must be a positive integer, got {raw:?}"
                    )));
                }
            },
        };

        Ok(Self {
            catalog_url: url("CODEQUEST_CATALOG_URL", DEFAULT_CATALOG_URL),
            execution_url: url("CODEQUEST_EXECUTION_URL", DEFAULT_EXECUTION_URL),
            story_url: url("CODEQUEST_STORY_URL", DEFAULT_STORY_URL),
            dialogue_url: url("CODEQUEST_DIALOGUE_URL", DEFAULT_DIALOGUE_URL),
            dialogue_api_key: var("CODEQUEST_DIALOGUE_API_KEY").or_else(|| var("OPENAI_API_KEY")),
            state_path: PathBuf::from(url("CODEQUEST_STATE_PATH", DEFAULT_STATE_PATH)),
            http_timeout,
        })
    }
}
