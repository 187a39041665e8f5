//! How the two named paths are presented on the choice screen.
//!
//! Titles, blurbs and the journey line come from the dialogue service when
//! one is configured. Each piece has two fixed fallbacks: one used when no
//! service is configured, one when the service fails or answers blank.

use codequest_catalog::domain::selector::PathChoice;
use codequest_core::dialogue::PresentationKind;

/// Title and blurb for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPresentation {
    pub choice: PathChoice,
    pub title: String,
    pub description: String,
}

/// Everything shown between the story and the learner's choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceScreen {
    pub journey: String,
    pub paths: [PathPresentation; 2],
}

/// Why fixed text stands in for generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// No dialogue service is configured.
    Offline,
    /// The service failed or answered with nothing.
    Failed,
}

const JOURNEY: &str = "You stand at the crossroads of an epic coding adventure, where every \
algorithm is a spell waiting to be mastered and every data structure holds the key to \
unlocking new realms of computational power.";

/// Context the title of `choice` is generated from. The first path reads
/// as the systematic approach, the second as the creative one.
#[must_use]
pub fn title_context(choice: &PathChoice, topic_id: &str) -> String {
    match choice {
        PathChoice::Path1 => format!("approach A: the systematic path through {topic_id}"),
        PathChoice::Path2 => format!("approach B: the creative path through {topic_id}"),
        PathChoice::Explore(value) => format!("a wandering path ({value}) through {topic_id}"),
    }
}

/// Fixed text for `kind` given the generation `context`.
#[must_use]
pub fn fallback_text(kind: PresentationKind, context: &str, fallback: Fallback) -> String {
    let text = match (kind, fallback) {
        (PresentationKind::PathTitle, Fallback::Offline) => {
            if context.contains("approach A") || context.contains("systematic") {
                "Path of Ancient Wisdom"
            } else {
                "Path of Digital Dragons"
            }
        }
        (PresentationKind::PathTitle, Fallback::Failed) => "Path of Mystical Mastery",
        (PresentationKind::FirstPathDescription, Fallback::Offline) => {
            "Master the time-tested algorithms of legendary coders. Follow systematic \
             approaches that have stood the test of time. Build your foundation with proven \
             techniques and disciplined practice."
        }
        (PresentationKind::FirstPathDescription, Fallback::Failed) => {
            "This mystical path leads through ancient coding temples where systematic wisdom \
             has been preserved for centuries. Follow the time-tested methods of legendary \
             programmers who have mastered the fundamentals through disciplined practice."
        }
        (PresentationKind::SecondPathDescription, Fallback::Offline) => {
            "Forge new solutions through creative experimentation. Embrace innovative \
             approaches and bold thinking. Discover uncharted territories where coding magic \
             awaits."
        }
        (PresentationKind::SecondPathDescription, Fallback::Failed) => {
            "This enchanted path winds through uncharted territories where innovative coding \
             magic awaits discovery. Embrace the unknown and forge new solutions through \
             creative experimentation and bold thinking."
        }
        (PresentationKind::Journey, _) => JOURNEY,
    };
    text.to_owned()
}
