//! Domain layer for code execution.

pub mod entry_point;
pub mod outcome;
