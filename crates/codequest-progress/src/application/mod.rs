//! Application layer for the Difficulty Ledger.

pub mod ledger;
