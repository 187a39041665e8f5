//! Domain layer for the companion.

pub mod chat;
pub mod emotion;
pub mod playback;
pub mod transcript;
