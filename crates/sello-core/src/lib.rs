//! Core domain types for the attendance attestation service.
//!
//! Provides the wire-format payloads exchanged with the check-in page and
//! the attendance record that gets ABI-encoded on-chain. All other crates
//! in the workspace build on these types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod models;

pub use models::{AttendanceRecord, CheckinRequest, CheckinResponse, ErrorBody, EventDefaults};
