//! Shared test fakes and utilities for the CodeQuest practice engine.

mod clock;
mod dialogue;
mod execution;
mod rng;
mod source;
mod store;
mod story;

pub use clock::FixedClock;
pub use dialogue::{FailingDialogueService, GatedDialogueService, ScriptedDialogueService};
pub use execution::{FailingExecutionService, ScriptedExecutionService};
pub use rng::{MockRng, SequenceRng};
pub use source::{StaticProblemSource, UnavailableProblemSource, sample_detail};
pub use store::{FailingProgressStore, InMemoryProgressStore};
pub use story::{FailingStoryService, ScriptedStoryService};
