//! Test dialogue services.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use codequest_core::dialogue::{DialogueService, PresentationKind};
use codequest_core::error::ServiceError;
use tokio::sync::Notify;

/// A dialogue service that returns fixed texts and counts calls.
#[derive(Debug)]
pub struct ScriptedDialogueService {
    review_text: String,
    chat_text: String,
    calls: Mutex<Vec<String>>,
}

impl ScriptedDialogueService {
    /// Create a service answering reviews with `review_text` and chats with
    /// `chat_text`.
    #[must_use]
    pub fn new(review_text: &str, chat_text: &str) -> Self {
        Self {
            review_text: review_text.to_owned(),
            chat_text: chat_text.to_owned(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the recorded calls as `review(<language>)`, `chat(<message>)`
    /// or `present(<kind>)`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DialogueService for ScriptedDialogueService {
    async fn review(&self, _code: &str, language: &str) -> Result<String, ServiceError> {
        self.calls.lock().unwrap().push(format!("review({language})"));
        Ok(self.review_text.clone())
    }

    async fn chat(&self, message: &str) -> Result<String, ServiceError> {
        self.calls.lock().unwrap().push(format!("chat({message})"));
        Ok(self.chat_text.clone())
    }

    /// Answers with `<kind>: <context>` so tests can see what was asked.
    async fn present(&self, kind: PresentationKind, context: &str) -> Result<String, ServiceError> {
        self.calls.lock().unwrap().push(format!("present({kind})"));
        Ok(format!("{kind}: {context}"))
    }
}

/// A dialogue service whose calls block until the test releases them, so the
/// in-flight (`Thinking`) state and stale-response handling can be observed.
#[derive(Debug)]
pub struct GatedDialogueService {
    gate: Arc<Notify>,
    text: String,
}

impl GatedDialogueService {
    /// Create a gated service answering every call with `text`. Returns the
    /// service and the handle that releases one pending call per
    /// `notify_one`.
    #[must_use]
    pub fn new(text: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        (
            Self {
                gate: Arc::clone(&gate),
                text: text.to_owned(),
            },
            gate,
        )
    }
}

#[async_trait]
impl DialogueService for GatedDialogueService {
    async fn review(&self, _code: &str, _language: &str) -> Result<String, ServiceError> {
        self.gate.notified().await;
        Ok(self.text.clone())
    }

    async fn chat(&self, _message: &str) -> Result<String, ServiceError> {
        self.gate.notified().await;
        Ok(self.text.clone())
    }

    async fn present(&self, _kind: PresentationKind, _context: &str) -> Result<String, ServiceError> {
        self.gate.notified().await;
        Ok(self.text.clone())
    }
}

/// A dialogue service that is never reachable.
#[derive(Debug)]
pub struct FailingDialogueService;

#[async_trait]
impl DialogueService for FailingDialogueService {
    async fn review(&self, _code: &str, _language: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Timeout(std::time::Duration::from_secs(30)))
    }

    async fn chat(&self, _message: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Transport("connection reset".into()))
    }

    async fn present(&self, _kind: PresentationKind, _context: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Rejected {
            status: 503,
            message: "overloaded".into(),
        })
    }
}
