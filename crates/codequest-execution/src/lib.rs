//! CodeQuest: Execution coordinator.
//!
//! Responsible for validating submissions locally, sending them to the
//! execution service once, and interpreting the report as an outcome the
//! session can act on.

pub mod application;
pub mod domain;
