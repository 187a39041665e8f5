//! AI dialogue service abstraction.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Piece of choice-screen flavour text the dialogue service can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresentationKind {
    /// Short title in the form `Path of ...`.
    PathTitle,
    /// Blurb for the first path.
    FirstPathDescription,
    /// Blurb for the second path.
    SecondPathDescription,
    /// Summary of where the learner stands in the story.
    Journey,
}

impl PresentationKind {
    /// Identifier used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PathTitle => "pathTitle",
            Self::FirstPathDescription => "firstPathDescription",
            Self::SecondPathDescription => "secondPathDescription",
            Self::Journey => "journey",
        }
    }
}

impl fmt::Display for PresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External AI text service backing the companion.
#[async_trait]
pub trait DialogueService: Send + Sync {
    /// Request a natural-language critique of submitted code.
    async fn review(&self, code: &str, language: &str) -> Result<String, ServiceError>;

    /// Answer a single free-text chat message.
    async fn chat(&self, message: &str) -> Result<String, ServiceError>;

    /// Write one piece of choice-screen text from `context`.
    async fn present(&self, kind: PresentationKind, context: &str) -> Result<String, ServiceError>;
}
