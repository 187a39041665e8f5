//! CodeQuest Core: shared domain types and collaborator ports.
//!
//! This crate defines the value types every component exchanges and the
//! traits through which external services and durable storage are injected.
//! It contains no infrastructure code.

pub mod clock;
pub mod dialogue;
pub mod error;
pub mod execution;
pub mod problem;
pub mod rng;
pub mod source;
pub mod store;
pub mod story;
pub mod tier;
