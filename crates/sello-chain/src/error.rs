//! Error taxonomy for chain operations.

use alloy::{
    contract,
    primitives::{Address, TxHash},
    transports::TransportError,
};
use thiserror::Error;

/// Result type alias for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;

/// Errors raised while resolving recipients, submitting attestations, or
/// recovering receipts.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC transport failure: connection, serialization, or a node-side
    /// error response.
    #[error("RPC error: {source}")]
    Rpc {
        /// Underlying transport error.
        #[from]
        source: TransportError,
    },

    /// Contract interaction failed before a transaction hash was assigned.
    #[error("contract error: {source}")]
    Contract {
        /// Underlying contract error.
        #[from]
        source: contract::Error,
    },

    /// Organizer private key does not parse as a secp256k1 key.
    #[error("organizer private key is not a valid 32-byte hex key")]
    InvalidOrganizerKey,

    /// Organizer wallet cannot pay for gas.
    #[error("Organizer wallet has zero balance. Address: {organizer}. Please fund it before attesting.")]
    ZeroBalance {
        /// Organizer wallet that needs funding.
        organizer: Address,
    },

    /// Transaction was mined but reverted.
    #[error("Transaction failed")]
    TransactionFailed {
        /// Hash of the reverted transaction.
        tx_hash: TxHash,
    },

    /// No receipt materialized within the polling window.
    #[error("Transaction sent but no receipt available")]
    ReceiptUnavailable {
        /// Hash of the transaction that never produced a receipt.
        tx_hash: TxHash,
    },
}

impl ChainError {
    /// Transaction hash tied to this failure, when one exists.
    ///
    /// Failures that happen after submission carry the hash so callers can
    /// surface it alongside the error.
    pub const fn tx_hash(&self) -> Option<TxHash> {
        match self {
            Self::TransactionFailed { tx_hash } | Self::ReceiptUnavailable { tx_hash } => {
                Some(*tx_hash)
            }
            Self::Rpc { .. }
            | Self::Contract { .. }
            | Self::InvalidOrganizerKey
            | Self::ZeroBalance { .. } => None,
        }
    }
}
