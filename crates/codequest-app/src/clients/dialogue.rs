//! AI dialogue client.

use async_trait::async_trait;
use codequest_core::dialogue::{DialogueService, PresentationKind};
use codequest_core::error::ServiceError;
use serde::{Deserialize, Serialize};

use crate::clients::http::HttpBackend;

#[derive(Debug, Serialize)]
struct ReviewRequest<'a> {
    code: &'a str,
    language: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct PresentRequest<'a> {
    kind: PresentationKind,
    context: &'a str,
}

#[derive(Debug, Deserialize)]
struct TextReply {
    text: String,
}

/// [`DialogueService`] backed by the companion endpoints. Only built when
/// a credential is configured; the backend carries it as a bearer token.
#[derive(Debug, Clone)]
pub struct HttpDialogueService {
    backend: HttpBackend,
}

impl HttpDialogueService {
    #[must_use]
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl DialogueService for HttpDialogueService {
    async fn review(&self, code: &str, language: &str) -> Result<String, ServiceError> {
        let reply: TextReply = self
            .backend
            .post(&["api", "companion", "review"], &ReviewRequest { code, language })
            .await?;
        Ok(reply.text)
    }

    async fn chat(&self, message: &str) -> Result<String, ServiceError> {
        let reply: TextReply = self
            .backend
            .post(&["api", "companion", "chat"], &ChatRequest { message })
            .await?;
        Ok(reply.text)
    }

    async fn present(&self, kind: PresentationKind, context: &str) -> Result<String, ServiceError> {
        let reply: TextReply = self
            .backend
            .post(&["api", "companion", "present"], &PresentRequest { kind, context })
            .await?;
        Ok(reply.text)
    }
}
