//! Application layer for the companion.

pub mod companion;
