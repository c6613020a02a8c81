//! HTTP API for the attendance attestation service.
//!
//! Provides the attestation endpoint, the check-in page, health endpoints,
//! configuration loading, and server lifecycle management.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use server::{create_router, start_server, AppState};
