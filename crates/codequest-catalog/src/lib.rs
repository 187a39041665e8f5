//! CodeQuest: Problem catalog.
//!
//! Responsible for fetching problems from the external catalog under
//! bounded timeouts, choosing the next problem for a learner, and the
//! built-in problem bank used when the catalog cannot help.

pub mod application;
pub mod domain;
