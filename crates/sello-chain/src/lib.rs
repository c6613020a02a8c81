//! Chain-facing operations for attendance attestations.
//!
//! Covers recipient resolution (literal addresses and ENS names), the
//! attestation contract interface with schema encoding, and a short-lived
//! client that submits attestation transactions and recovers their UIDs
//! from receipts.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod eas;
pub mod ens;
pub mod error;

pub use client::{organizer_address, probe_rpc, AttestationOutcome, ChainClient, ChainConfig};
pub use eas::{encode_attendance_data, extract_attested_uid, ATTESTED_EVENT_TOPIC, UNKNOWN_UID};
pub use ens::{namehash, parse_address, DEFAULT_ENS_REGISTRY};
pub use error::{ChainError, Result};
