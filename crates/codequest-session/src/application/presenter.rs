//! Choice-screen text: generated when possible, fixed otherwise.

use std::fmt;
use std::sync::Arc;

use codequest_catalog::domain::selector::PathChoice;
use codequest_core::dialogue::{DialogueService, PresentationKind};
use tracing::{info, instrument, warn};

use crate::domain::paths::{ChoiceScreen, Fallback, PathPresentation, fallback_text, title_context};

/// Writes the choice screen shown after a story opening.
pub struct PathPresenter {
    dialogue: Option<Arc<dyn DialogueService>>,
}

impl fmt::Debug for PathPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPresenter")
            .field("has_dialogue", &self.dialogue.is_some())
            .finish()
    }
}

impl PathPresenter {
    #[must_use]
    pub fn new(dialogue: Option<Arc<dyn DialogueService>>) -> Self {
        Self { dialogue }
    }

    /// Builds the journey line and both path presentations for `topic_id`
    /// from the story the learner is reading. Never fails.
    #[instrument(skip(self, story))]
    pub async fn present(&self, topic_id: &str, story: &str) -> ChoiceScreen {
        let journey = self.text(PresentationKind::Journey, story).await;
        let first_title = self
            .text(PresentationKind::PathTitle, &title_context(&PathChoice::Path1, topic_id))
            .await;
        let second_title = self
            .text(PresentationKind::PathTitle, &title_context(&PathChoice::Path2, topic_id))
            .await;
        let first_description = self.text(PresentationKind::FirstPathDescription, story).await;
        let second_description = self.text(PresentationKind::SecondPathDescription, story).await;

        ChoiceScreen {
            journey,
            paths: [
                PathPresentation {
                    choice: PathChoice::Path1,
                    title: first_title,
                    description: first_description,
                },
                PathPresentation {
                    choice: PathChoice::Path2,
                    title: second_title,
                    description: second_description,
                },
            ],
        }
    }

    async fn text(&self, kind: PresentationKind, context: &str) -> String {
        let Some(dialogue) = &self.dialogue else {
            info!(%kind, "no dialogue credential, using fixed text");
            return fallback_text(kind, context, Fallback::Offline);
        };
        match dialogue.present(kind, context).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_owned(),
            Ok(_) => {
                warn!(%kind, "dialogue service returned empty text");
                fallback_text(kind, context, Fallback::Failed)
            }
            Err(err) => {
                warn!(%kind, error = %err, "presentation request failed");
                fallback_text(kind, context, Fallback::Failed)
            }
        }
    }
}
