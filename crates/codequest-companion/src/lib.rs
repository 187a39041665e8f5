//! CodeQuest: Companion dialogue engine.
//!
//! Responsible for turning code reviews and chat replies into timed,
//! emotion-tagged utterances, playing them back one at a time, and keeping
//! the per-problem chat log.

pub mod application;
pub mod domain;
