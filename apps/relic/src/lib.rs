//! # Relic - Token Registry Server
//!
//! Library surface of the Relic application. The binary in `main.rs` is a
//! thin wrapper; everything it runs lives here so integration tests can
//! drive the API and CLI layers directly.

pub mod api;
pub mod cli;
