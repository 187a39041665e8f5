//! Domain layer for the Difficulty Ledger.

pub mod progress;
