//! Domain layer for the problem catalog.

pub mod bank;
pub mod selector;
