//! Test infrastructure for exercising the attestation service without a
//! real chain.
//!
//! Provides a wiremock-backed JSON-RPC node that answers the request
//! methods a provider issues during an attestation flow, plus fixture
//! builders for receipts, logs, and blocks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod rpc;

pub use rpc::{MockRpc, ReceiptBehavior};
