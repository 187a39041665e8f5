//! Application layer for the practice session.

pub mod practice;
pub mod presenter;
