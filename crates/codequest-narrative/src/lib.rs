//! CodeQuest: Narrative session.
//!
//! Responsible for the story shown around a topic playthrough: an immediate
//! local placeholder, best-effort refinement from the story service, and a
//! continuation each time the learner advances a tier.

pub mod application;
pub mod domain;
