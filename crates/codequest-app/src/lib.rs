//! CodeQuest: terminal driver library.
//!
//! HTTP clients for the catalog, execution, story and dialogue services,
//! environment configuration, tracing setup, and the command language of
//! the `codequest` binary.

pub mod clients;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod terminal;
