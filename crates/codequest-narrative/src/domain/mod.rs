//! Domain layer for the narrative session.

pub mod state;
