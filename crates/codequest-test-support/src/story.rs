//! Test story services.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use codequest_core::error::ServiceError;
use codequest_core::story::{ContinueStory, StoryReply, StoryService};

/// A story service that answers with numbered chapters and records every
/// call. Start replies use conversation `conv-1`; each continuation bumps the
/// checkpoint (`cp-1`, `cp-2`, ...).
#[derive(Debug, Default)]
pub struct ScriptedStoryService {
    delay: Option<Duration>,
    starts: Mutex<Vec<String>>,
    continuations: Mutex<Vec<ContinueStory>>,
}

impl ScriptedStoryService {
    /// Create a service that answers immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stall every call for `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Topics passed to `start`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn starts(&self) -> Vec<String> {
        self.starts.lock().unwrap().clone()
    }

    /// Requests passed to `continue_story`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn continuations(&self) -> Vec<ContinueStory> {
        self.continuations.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryService for ScriptedStoryService {
    async fn start(&self, topic_id: &str) -> Result<StoryReply, ServiceError> {
        self.starts.lock().unwrap().push(topic_id.to_owned());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(StoryReply {
            conversation_id: "conv-1".to_owned(),
            checkpoint_id: "cp-0".to_owned(),
            story: format!("The realm of {topic_id} awaits."),
        })
    }

    async fn continue_story(&self, request: &ContinueStory) -> Result<StoryReply, ServiceError> {
        let chapter = {
            let mut continuations = self.continuations.lock().unwrap();
            continuations.push(request.clone());
            continuations.len()
        };
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(StoryReply {
            conversation_id: request.conversation_id.clone(),
            checkpoint_id: format!("cp-{chapter}"),
            story: format!("Chapter {chapter}: the {} trials begin.", request.tier),
        })
    }
}

/// A story service that is never reachable.
#[derive(Debug)]
pub struct FailingStoryService;

#[async_trait]
impl StoryService for FailingStoryService {
    async fn start(&self, _topic_id: &str) -> Result<StoryReply, ServiceError> {
        Err(ServiceError::Transport("connection refused".into()))
    }

    async fn continue_story(&self, _request: &ContinueStory) -> Result<StoryReply, ServiceError> {
        Err(ServiceError::Transport("connection refused".into()))
    }
}
