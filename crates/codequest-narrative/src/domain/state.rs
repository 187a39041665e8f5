//! Story state threaded through a playthrough.

use codequest_core::story::{ContinueStory, StoryReply};
use codequest_core::tier::Tier;
use uuid::Uuid;

const LOCAL_PREFIX: &str = "local-";

/// Where the story stands for one topic playthrough.
///
/// Passed by value into every continuation so the story service can keep
/// per-conversation context without the full history being re-sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeState {
    pub conversation_id: String,
    pub checkpoint_id: String,
    pub story_text: String,
}

impl NarrativeState {
    /// Local opening shown before the story service has answered.
    #[must_use]
    pub fn placeholder(topic_id: &str) -> Self {
        Self {
            conversation_id: format!("{LOCAL_PREFIX}{}", Uuid::new_v4()),
            checkpoint_id: format!("{LOCAL_PREFIX}0"),
            story_text: format!(
                "Welcome to {topic_id}! You find yourself in a mysterious coding realm where \
                 algorithms hold the key to unlocking ancient secrets. Will you take the path \
                 of efficiency, or the path of elegance?"
            ),
        }
    }

    /// `true` while the conversation has never reached the story service.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.conversation_id.starts_with(LOCAL_PREFIX)
    }

    /// Request continuing this story into `tier`.
    #[must_use]
    pub fn continuation(&self, tier: Tier) -> ContinueStory {
        ContinueStory {
            conversation_id: self.conversation_id.clone(),
            checkpoint_id: self.checkpoint_id.clone(),
            previous_story: self.story_text.clone(),
            tier,
        }
    }

    /// Canned continuation used when the story service fails. Keeps the
    /// conversation and checkpoint so the result can be continued again.
    #[must_use]
    pub fn congratulated(&self, tier: Tier) -> Self {
        Self {
            conversation_id: self.conversation_id.clone(),
            checkpoint_id: self.checkpoint_id.clone(),
            story_text: format!(
                "Congratulations! You've conquered every challenge on this stretch of the path. \
                 Your journey continues as the {tier} trials come into view..."
            ),
        }
    }

    /// Closing chapter once no problems remain in the topic.
    #[must_use]
    pub fn concluded(&self, topic_id: &str) -> Self {
        Self {
            conversation_id: self.conversation_id.clone(),
            checkpoint_id: self.checkpoint_id.clone(),
            story_text: format!(
                "{}\n\nYou have solved every problem {topic_id} had to offer. The realm falls \
                 quiet, its secrets yours. Choose a new topic to begin another adventure.",
                self.story_text
            ),
        }
    }
}

impl From<StoryReply> for NarrativeState {
    fn from(reply: StoryReply) -> Self {
        Self {
            conversation_id: reply.conversation_id,
            checkpoint_id: reply.checkpoint_id,
            story_text: reply.story,
        }
    }
}
