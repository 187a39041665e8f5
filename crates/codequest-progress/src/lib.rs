//! CodeQuest: Difficulty Ledger.
//!
//! Responsible for per-topic difficulty tiers and the global set of
//! completed problems. Every mutation is durably written before it returns.

pub mod application;
pub mod domain;
