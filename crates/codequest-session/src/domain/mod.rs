//! Domain layer for the practice session.

pub mod paths;
pub mod progression;
