//! Story/narrative service abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::tier::Tier;

/// Reply from the story service for both start and continue calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryReply {
    /// Conversation the backend keeps context under.
    pub conversation_id: String,
    /// Checkpoint identifying this point in the conversation.
    pub checkpoint_id: String,
    /// Story text to display.
    pub story: String,
}

/// Request to continue an existing story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueStory {
    /// Conversation to continue.
    pub conversation_id: String,
    /// Checkpoint to continue from.
    pub checkpoint_id: String,
    /// Story text currently shown to the learner.
    pub previous_story: String,
    /// Tier the learner has just advanced into.
    pub tier: Tier,
}

/// External story generation service.
#[async_trait]
pub trait StoryService: Send + Sync {
    /// Start a new story for a topic.
    async fn start(&self, topic_id: &str) -> Result<StoryReply, ServiceError>;

    /// Continue an existing story after a tier change.
    async fn continue_story(&self, request: &ContinueStory) -> Result<StoryReply, ServiceError>;
}
