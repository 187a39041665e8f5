//! Application layer for the problem catalog.

pub mod gateway;
pub mod resolver;
