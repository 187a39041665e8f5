//! Story service client.

use async_trait::async_trait;
use codequest_core::error::ServiceError;
use codequest_core::story::{ContinueStory, StoryReply, StoryService};
use serde::Serialize;

use crate::clients::http::HttpBackend;

#[derive(Debug, Serialize)]
struct StartStory<'a> {
    topic: &'a str,
}

/// [`StoryService`] backed by the story service.
#[derive(Debug, Clone)]
pub struct HttpStoryService {
    backend: HttpBackend,
}

impl HttpStoryService {
    #[must_use]
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl StoryService for HttpStoryService {
    async fn start(&self, topic_id: &str) -> Result<StoryReply, ServiceError> {
        self.backend
            .post(&["api", "story", "start"], &StartStory { topic: topic_id })
            .await
    }

    async fn continue_story(&self, request: &ContinueStory) -> Result<StoryReply, ServiceError> {
        self.backend
            .post(&["api", "story", "continue"], request)
            .await
    }
}
