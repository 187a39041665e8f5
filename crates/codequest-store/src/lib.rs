//! CodeQuest Store: durable progress persistence.
//!
//! Progress is kept in a single JSON document on local disk. Every write
//! replaces the document atomically, so a crash leaves either the previous
//! or the new state, never a torn file.

pub mod file_store;
pub mod schema;

pub use file_store::JsonFileProgressStore;
