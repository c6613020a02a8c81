//! HTTP request handlers for the attestation service.
//!
//! Handlers validate input before any network traffic, dial a short-lived
//! chain client per request, and map failures onto the wire error body
//! with the matching status code.

pub mod attest;
pub mod checkin;
pub mod health;

pub use attest::{attest, method_not_allowed};
pub use checkin::checkin_page;
pub use health::{health_check, liveness_check, readiness_check};
