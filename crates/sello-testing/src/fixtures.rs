//! Chain fixtures: well-known test identities and JSON bodies shaped like
//! real node responses.

use alloy_primitives::{address, b256, Address, B256};
use serde_json::{json, Value};

/// Development key 0 of the standard local-node mnemonic; funds the
/// organizer wallet in tests.
pub const ORGANIZER_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Address derived from [`ORGANIZER_KEY`].
pub const ORGANIZER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// Recipient wallet used across tests.
pub const RECIPIENT: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

/// Schema UID used across tests.
pub const SCHEMA_UID: B256 =
    b256!("4242424242424242424242424242424242424242424242424242424242424242");

/// Attestation contract address used across tests.
pub const EAS_ADDRESS: Address = address!("4200000000000000000000000000000000000021");

/// ENS registry address used across tests.
pub const ENS_REGISTRY: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

/// Resolver address handed out for registered ENS names.
pub const ENS_RESOLVER: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

/// Hash assigned to every submitted transaction.
pub const TX_HASH: B256 =
    b256!("c0ffee11c0ffee11c0ffee11c0ffee11c0ffee11c0ffee11c0ffee11c0ffee11");

/// Attestation UID carried in the mocked `Attested` log.
pub const ATTESTATION_UID: B256 =
    b256!("ab1ab1ab1ab1ab1ab1ab1ab1ab1ab1ab1ab1ab1ab1ab1ab1ab1ab1ab1ab1ab1a");

/// Block hash used by receipt and block fixtures.
pub const BLOCK_HASH: B256 =
    b256!("b10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10c");

/// A 32-byte topic holding a left-padded address.
pub fn address_topic(address: Address) -> String {
    B256::left_padding_from(address.as_slice()).to_string()
}

/// Canonical `Attested` event log with the UID in the data section.
pub fn attested_log_json(uid: B256) -> Value {
    json!({
        "address": EAS_ADDRESS.to_string(),
        "topics": [
            sello_chain::ATTESTED_EVENT_TOPIC.to_string(),
            address_topic(RECIPIENT),
            address_topic(ORGANIZER),
            SCHEMA_UID.to_string(),
        ],
        "data": uid.to_string(),
        "blockHash": BLOCK_HASH.to_string(),
        "blockNumber": "0x10",
        "transactionHash": TX_HASH.to_string(),
        "transactionIndex": "0x0",
        "logIndex": "0x0",
        "removed": false,
    })
}

/// Receipt JSON in the shape `eth_getTransactionReceipt` returns.
pub fn receipt_json(tx_hash: B256, success: bool, logs: Vec<Value>) -> Value {
    json!({
        "transactionHash": tx_hash.to_string(),
        "transactionIndex": "0x0",
        "blockHash": BLOCK_HASH.to_string(),
        "blockNumber": "0x10",
        "from": ORGANIZER.to_string(),
        "to": EAS_ADDRESS.to_string(),
        "cumulativeGasUsed": "0x2af8",
        "gasUsed": "0x2af8",
        "effectiveGasPrice": "0x3b9aca00",
        "contractAddress": null,
        "logs": logs,
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "type": "0x2",
        "status": if success { "0x1" } else { "0x0" },
    })
}

/// Fee history answer covering the provider's EIP-1559 estimation query.
pub fn fee_history_json() -> Value {
    json!({
        "oldestBlock": "0x1",
        "baseFeePerGas": vec!["0x3b9aca00"; 11],
        "gasUsedRatio": vec![0.4; 10],
        "reward": vec![vec!["0x5f5e100"]; 10],
    })
}

/// Minimal-but-complete block answer for `eth_getBlockByNumber`.
pub fn block_json() -> Value {
    json!({
        "hash": BLOCK_HASH.to_string(),
        "parentHash": B256::ZERO.to_string(),
        "sha3Uncles": B256::ZERO.to_string(),
        "miner": Address::ZERO.to_string(),
        "stateRoot": B256::ZERO.to_string(),
        "transactionsRoot": B256::ZERO.to_string(),
        "receiptsRoot": B256::ZERO.to_string(),
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "difficulty": "0x0",
        "number": "0x10",
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x5208",
        "timestamp": "0x66f2a380",
        "extraData": "0x",
        "mixHash": B256::ZERO.to_string(),
        "nonce": "0x0000000000000000",
        "baseFeePerGas": "0x3b9aca00",
        "totalDifficulty": "0x0",
        "size": "0x220",
        "transactions": [],
        "uncles": [],
    })
}
