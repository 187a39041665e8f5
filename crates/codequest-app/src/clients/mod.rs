//! HTTP clients for the external collaborators.

pub mod catalog;
pub mod dialogue;
pub mod execution;
pub mod http;
pub mod story;
