//! Application layer for code execution.

pub mod coordinator;
