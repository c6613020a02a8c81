//! Integration tests for the chain client against a mock RPC node.

use std::time::Duration;

use alloy::primitives::U256;
use sello_chain::{ChainClient, ChainConfig, ChainError, UNKNOWN_UID};
use sello_core::{AttendanceRecord, EventDefaults};
use sello_testing::{fixtures, MockRpc, ReceiptBehavior};

fn chain_config(rpc_url: String) -> ChainConfig {
    ChainConfig {
        rpc_url,
        organizer_key: fixtures::ORGANIZER_KEY.to_string(),
        eas_address: fixtures::EAS_ADDRESS,
        schema_uid: fixtures::SCHEMA_UID,
        ens_registry: fixtures::ENS_REGISTRY,
        receipt_poll_interval: Duration::from_millis(10),
        receipt_poll_attempts: 5,
    }
}

fn sample_record(attester: alloy::primitives::Address) -> AttendanceRecord {
    let defaults = EventDefaults {
        event_id: "ethfloripa-2025".to_string(),
        event_title: "EthFloripa".to_string(),
        date: 1_755_907_200,
        location: "Florianopolis".to_string(),
        organizer: "EthFloripa Team".to_string(),
    };
    AttendanceRecord::from_defaults(&defaults, attester)
}

#[tokio::test]
async fn connect_derives_organizer_and_reports_chain_id() {
    let rpc = MockRpc::start().await;
    let client = ChainClient::connect(&chain_config(rpc.uri())).await.expect("connect");

    assert_eq!(client.organizer(), fixtures::ORGANIZER);
    assert_eq!(client.chain_id(), sello_testing::rpc::CHAIN_ID);
}

#[tokio::test]
async fn connect_rejects_a_malformed_key() {
    let rpc = MockRpc::start().await;
    let mut config = chain_config(rpc.uri());
    config.organizer_key = "not-a-key".to_string();

    let error = ChainClient::connect(&config).await.expect_err("bad key");
    assert!(matches!(error, ChainError::InvalidOrganizerKey));
    // The key is validated before anything is sent.
    assert_eq!(rpc.total_requests().await, 0);
}

#[tokio::test]
async fn organizer_balance_reflects_node_state() {
    let rpc = MockRpc::start().await;
    let client = ChainClient::connect(&chain_config(rpc.uri())).await.expect("connect");

    let funded = client.organizer_balance().await.expect("balance");
    assert_eq!(funded, U256::from(1_000_000_000_000_000_000_u64));

    rpc.set_balance(U256::ZERO);
    let empty = client.organizer_balance().await.expect("balance");
    assert!(empty.is_zero());
}

#[tokio::test]
async fn submit_and_wait_recovers_the_uid() {
    let rpc = MockRpc::start().await;
    let client = ChainClient::connect(&chain_config(rpc.uri())).await.expect("connect");

    let record = sample_record(client.organizer());
    let tx_hash =
        client.submit_attestation(fixtures::RECIPIENT, &record).await.expect("submit");
    assert_eq!(tx_hash, fixtures::TX_HASH);

    let outcome = client.wait_for_attestation(tx_hash).await.expect("confirm");
    assert_eq!(outcome.uid, fixtures::ATTESTATION_UID.to_string());
    assert_eq!(outcome.tx_hash, fixtures::TX_HASH);
}

#[tokio::test]
async fn reverted_transaction_is_an_error_with_the_hash() {
    let rpc = MockRpc::start().await;
    rpc.set_receipt(ReceiptBehavior::Reverted);
    let client = ChainClient::connect(&chain_config(rpc.uri())).await.expect("connect");

    let error = client.wait_for_attestation(fixtures::TX_HASH).await.expect_err("revert");
    match error {
        ChainError::TransactionFailed { tx_hash } => assert_eq!(tx_hash, fixtures::TX_HASH),
        other => panic!("expected TransactionFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn mined_transaction_without_attested_log_reports_unknown() {
    let rpc = MockRpc::start().await;
    rpc.set_receipt(ReceiptBehavior::MinedWithoutLog);
    let client = ChainClient::connect(&chain_config(rpc.uri())).await.expect("connect");

    let outcome = client.wait_for_attestation(fixtures::TX_HASH).await.expect("confirm");
    assert_eq!(outcome.uid, UNKNOWN_UID);
}

#[tokio::test]
async fn missing_receipt_exhausts_the_polling_window() {
    let rpc = MockRpc::start().await;
    rpc.set_receipt(ReceiptBehavior::Missing);
    let client = ChainClient::connect(&chain_config(rpc.uri())).await.expect("connect");

    let error = client.wait_for_attestation(fixtures::TX_HASH).await.expect_err("no receipt");
    match error {
        ChainError::ReceiptUnavailable { tx_hash } => assert_eq!(tx_hash, fixtures::TX_HASH),
        other => panic!("expected ReceiptUnavailable, got {other:?}"),
    }
    assert_eq!(rpc.method_calls("eth_getTransactionReceipt").await, 5);
}

#[tokio::test]
async fn delayed_receipt_eventually_confirms() {
    let rpc = MockRpc::start().await;
    rpc.set_receipt(ReceiptBehavior::DelayedAttested(2));
    let client = ChainClient::connect(&chain_config(rpc.uri())).await.expect("connect");

    let outcome = client.wait_for_attestation(fixtures::TX_HASH).await.expect("confirm");
    assert_eq!(outcome.uid, fixtures::ATTESTATION_UID.to_string());
    assert_eq!(rpc.method_calls("eth_getTransactionReceipt").await, 3);
}

#[tokio::test]
async fn probe_rpc_reports_the_chain_id() {
    let rpc = MockRpc::start().await;
    let chain_id = sello_chain::probe_rpc(&rpc.uri()).await.expect("probe");
    assert_eq!(chain_id, sello_testing::rpc::CHAIN_ID);
}

#[test]
fn organizer_address_matches_the_known_key() {
    let derived = sello_chain::organizer_address(fixtures::ORGANIZER_KEY).expect("valid key");
    assert_eq!(derived, fixtures::ORGANIZER);

    // The 0x prefix is optional.
    let bare = fixtures::ORGANIZER_KEY.trim_start_matches("0x");
    assert_eq!(sello_chain::organizer_address(bare).expect("valid key"), derived);

    assert!(sello_chain::organizer_address("0x1234").is_err());
}
