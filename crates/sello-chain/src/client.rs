//! Short-lived chain client bound to the organizer wallet.
//!
//! A client is constructed per request: it dials the configured RPC
//! endpoint, derives the organizer address from the configured key, and
//! carries one check-in through balance check, attestation submission, and
//! receipt recovery.

use std::time::Duration;

use alloy::{
    consensus::TxReceipt,
    network::EthereumWallet,
    primitives::{Address, TxHash, B256, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use sello_core::AttendanceRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    eas::{encode_attendance_data, extract_attested_uid, IEAS, UNKNOWN_UID},
    ens,
    error::{ChainError, Result},
};

/// Configuration for the chain client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Organizer private key as hex, with or without `0x` prefix.
    pub organizer_key: String,
    /// Attestation contract address.
    pub eas_address: Address,
    /// UID of the registered attendance schema.
    pub schema_uid: B256,
    /// ENS registry address used for name resolution.
    pub ens_registry: Address,
    /// Delay between receipt polls.
    pub receipt_poll_interval: Duration,
    /// Maximum number of receipt polls before giving up.
    pub receipt_poll_attempts: u32,
}

/// Outcome of a confirmed attestation.
#[derive(Debug, Clone)]
pub struct AttestationOutcome {
    /// Attestation UID as 0x-prefixed hex, or the unknown sentinel.
    pub uid: String,
    /// Hash of the attestation transaction.
    pub tx_hash: TxHash,
}

/// Derives the organizer address from a private key without dialing.
///
/// Lets configuration validation reject a malformed key at startup
/// instead of on the first check-in.
pub fn organizer_address(key: &str) -> Result<Address> {
    let signer: PrivateKeySigner = key.trim().parse().map_err(|_| ChainError::InvalidOrganizerKey)?;
    Ok(signer.address())
}

/// Queries the chain id from an RPC endpoint without a wallet.
///
/// Used by health probes to verify upstream connectivity.
pub async fn probe_rpc(rpc_url: &str) -> Result<u64> {
    let provider = ProviderBuilder::new().connect(rpc_url).await?;
    Ok(provider.get_chain_id().await?)
}

/// Per-request chain client.
#[derive(Debug, Clone)]
pub struct ChainClient {
    provider: DynProvider,
    organizer: Address,
    chain_id: u64,
    config: ChainConfig,
}

impl ChainClient {
    /// Connects to the configured RPC endpoint with the organizer wallet.
    ///
    /// Queries the chain id up front, both as a connectivity check and to
    /// record which network the attestation will land on.
    pub async fn connect(config: &ChainConfig) -> Result<Self> {
        let signer: PrivateKeySigner =
            config.organizer_key.trim().parse().map_err(|_| ChainError::InvalidOrganizerKey)?;
        let organizer = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect(&config.rpc_url)
            .await?
            .erased();

        let chain_id = provider.get_chain_id().await?;
        info!(chain_id, organizer = %organizer, "connected to RPC endpoint");

        Ok(Self { provider, organizer, chain_id, config: config.clone() })
    }

    /// Organizer wallet address derived from the configured key.
    pub const fn organizer(&self) -> Address {
        self.organizer
    }

    /// Chain id reported by the RPC endpoint at connect time.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Resolves a recipient identifier, either a literal address or an ENS
    /// name. Returns `None` when the input does not resolve.
    pub async fn resolve_recipient(&self, input: &str) -> Option<Address> {
        ens::resolve_recipient(&self.provider, self.config.ens_registry, input).await
    }

    /// Current balance of the organizer wallet in wei.
    pub async fn organizer_balance(&self) -> Result<U256> {
        Ok(self.provider.get_balance(self.organizer).await?)
    }

    /// Submits the attestation transaction and returns its hash.
    ///
    /// The attestation never expires, is revocable, references no prior
    /// attestation, and transfers no value.
    #[instrument(skip(self, record), fields(recipient = %recipient))]
    pub async fn submit_attestation(
        &self,
        recipient: Address,
        record: &AttendanceRecord,
    ) -> Result<TxHash> {
        let request = IEAS::AttestationRequest {
            schema: self.config.schema_uid,
            data: IEAS::AttestationRequestData {
                recipient,
                expirationTime: 0,
                revocable: true,
                refUID: B256::ZERO,
                data: encode_attendance_data(record).into(),
                value: U256::ZERO,
            },
        };

        let eas = IEAS::new(self.config.eas_address, self.provider.clone());
        let pending = eas.attest(request).value(U256::ZERO).send().await?;
        let tx_hash = *pending.tx_hash();
        info!(tx_hash = %tx_hash, "attestation transaction submitted");
        Ok(tx_hash)
    }

    /// Waits for the attestation transaction to land and recovers its UID.
    ///
    /// Polls for the receipt at the configured interval. A reverted
    /// transaction and a receipt that never materializes are both errors
    /// carrying the transaction hash. A mined transaction without a
    /// recognizable attestation log still succeeds, with the unknown
    /// sentinel as UID.
    #[instrument(skip(self), fields(tx_hash = %tx_hash))]
    pub async fn wait_for_attestation(&self, tx_hash: TxHash) -> Result<AttestationOutcome> {
        for attempt in 0..self.config.receipt_poll_attempts {
            if attempt > 0 {
                tokio::time::sleep(self.config.receipt_poll_interval).await;
            }

            let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? else {
                debug!(attempt, "receipt not yet available");
                continue;
            };

            if !receipt.status() {
                return Err(ChainError::TransactionFailed { tx_hash });
            }

            let uid = extract_attested_uid(receipt.inner.logs())
                .unwrap_or_else(|| UNKNOWN_UID.to_string());
            info!(uid = %uid, "attestation confirmed");
            return Ok(AttestationOutcome { uid, tx_hash });
        }

        Err(ChainError::ReceiptUnavailable { tx_hash })
    }
}
