//! Application layer for the narrative session.

pub mod playthrough;
