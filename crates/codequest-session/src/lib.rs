//! CodeQuest: Practice session orchestration.
//!
//! Wires the difficulty ledger, problem resolver, narrative session,
//! execution coordinator and companion into the learner's flow: pick a
//! topic, choose a path, solve problems, and move up through the tiers.

pub mod application;
pub mod domain;
pub mod error;
