//! Mock JSON-RPC node for integration tests.
//!
//! A single catch-all wiremock responder dispatches on the JSON-RPC
//! method, covering everything a provider issues during an attestation
//! flow: chain identity, fee and nonce queries, transaction submission,
//! receipt polling, and `eth_call` for ENS lookups.

use std::sync::{Arc, Mutex, MutexGuard};

use alloy_primitives::{hex, Address, B256, U256};
use sello_chain::namehash;
use serde_json::{json, Value};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use crate::fixtures;

/// Chain id reported by the mock node.
pub const CHAIN_ID: u64 = 31337;

/// Function selector of `resolver(bytes32)` on the ENS registry.
const RESOLVER_SELECTOR: [u8; 4] = [0x01, 0x78, 0xb8, 0xbf];

/// Function selector of `addr(bytes32)` on a resolver.
const ADDR_SELECTOR: [u8; 4] = [0x3b, 0x3b, 0x57, 0xde];

/// Receipt behavior for `eth_getTransactionReceipt`.
#[derive(Debug, Clone)]
pub enum ReceiptBehavior {
    /// Success status with a canonical `Attested` log.
    Attested,
    /// Success status but no attestation log.
    MinedWithoutLog,
    /// Failure status.
    Reverted,
    /// The receipt is never found.
    Missing,
    /// Null for the given number of polls, then a successful receipt with
    /// an `Attested` log.
    DelayedAttested(u32),
}

#[derive(Debug)]
struct RpcSettings {
    balance: U256,
    receipt: ReceiptBehavior,
    pending_polls: u32,
    fail_calls: bool,
    ens: Vec<(B256, Address)>,
}

/// Mock JSON-RPC node.
///
/// Starts funded and with a successful attestation receipt; tests switch
/// behaviors through the setters before driving the code under test.
pub struct MockRpc {
    server: MockServer,
    settings: Arc<Mutex<RpcSettings>>,
}

impl MockRpc {
    /// Starts the mock node.
    pub async fn start() -> Self {
        let settings = Arc::new(Mutex::new(RpcSettings {
            balance: U256::from(1_000_000_000_000_000_000_u64),
            receipt: ReceiptBehavior::Attested,
            pending_polls: 0,
            fail_calls: false,
            ens: Vec::new(),
        }));

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(JsonRpcResponder { settings: Arc::clone(&settings) })
            .mount(&server)
            .await;

        Self { server, settings }
    }

    /// Endpoint URL of the mock node.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Sets the organizer balance returned by `eth_getBalance`.
    pub fn set_balance(&self, balance: U256) {
        self.lock().balance = balance;
    }

    /// Sets the receipt behavior for subsequent polls.
    pub fn set_receipt(&self, behavior: ReceiptBehavior) {
        let mut settings = self.lock();
        if let ReceiptBehavior::DelayedAttested(polls) = behavior {
            settings.pending_polls = polls;
        }
        settings.receipt = behavior;
    }

    /// Makes every `eth_call` fail with a node error.
    pub fn fail_calls(&self) {
        self.lock().fail_calls = true;
    }

    /// Registers an ENS name resolving to `address`.
    pub fn register_ens(&self, name: &str, address: Address) {
        let node = namehash(name);
        self.lock().ens.push((node, address));
    }

    /// Number of requests received for the given JSON-RPC method.
    pub async fn method_calls(&self, method_name: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| {
                serde_json::from_slice::<Value>(&request.body)
                    .ok()
                    .and_then(|body| {
                        body.get("method").and_then(Value::as_str).map(str::to_string)
                    })
                    .is_some_and(|m| m == method_name)
            })
            .count()
    }

    /// Total number of requests received.
    pub async fn total_requests(&self) -> usize {
        self.server.received_requests().await.unwrap_or_default().len()
    }

    fn lock(&self) -> MutexGuard<'_, RpcSettings> {
        self.settings.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct JsonRpcResponder {
    settings: Arc<Mutex<RpcSettings>>,
}

impl Respond for JsonRpcResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or_else(|_| json!({}));
        let id = body.get("id").cloned().unwrap_or_else(|| json!(1));
        let rpc_method = body.get("method").and_then(Value::as_str).unwrap_or_default();
        let params = body.get("params").cloned().unwrap_or_else(|| json!([]));

        let outcome = {
            let mut settings =
                self.settings.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            dispatch(&mut settings, rpc_method, &params)
        };

        let response = match outcome {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err(message) => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32000, "message": message }
            }),
        };
        ResponseTemplate::new(200).set_body_json(response)
    }
}

fn dispatch(settings: &mut RpcSettings, rpc_method: &str, params: &Value) -> Result<Value, String> {
    match rpc_method {
        "eth_chainId" => Ok(json!(format!("{CHAIN_ID:#x}"))),
        "eth_blockNumber" => Ok(json!("0x10")),
        "eth_getBalance" => Ok(json!(format!("{:#x}", settings.balance))),
        "eth_getTransactionCount" => Ok(json!("0x0")),
        "eth_estimateGas" => Ok(json!("0x30d40")),
        "eth_gasPrice" | "eth_maxPriorityFeePerGas" => Ok(json!("0x3b9aca00")),
        "eth_feeHistory" => Ok(fixtures::fee_history_json()),
        "eth_getBlockByNumber" => Ok(fixtures::block_json()),
        "eth_sendRawTransaction" => Ok(json!(fixtures::TX_HASH.to_string())),
        "eth_getTransactionReceipt" => Ok(receipt_result(settings)),
        "eth_call" => eth_call(settings, params),
        other => Err(format!("method {other} not mocked")),
    }
}

fn receipt_result(settings: &mut RpcSettings) -> Value {
    match settings.receipt {
        ReceiptBehavior::Missing => Value::Null,
        ReceiptBehavior::DelayedAttested(_) if settings.pending_polls > 0 => {
            settings.pending_polls -= 1;
            Value::Null
        }
        ReceiptBehavior::DelayedAttested(_) | ReceiptBehavior::Attested => fixtures::receipt_json(
            fixtures::TX_HASH,
            true,
            vec![fixtures::attested_log_json(fixtures::ATTESTATION_UID)],
        ),
        ReceiptBehavior::MinedWithoutLog => {
            fixtures::receipt_json(fixtures::TX_HASH, true, Vec::new())
        }
        ReceiptBehavior::Reverted => fixtures::receipt_json(fixtures::TX_HASH, false, Vec::new()),
    }
}

fn eth_call(settings: &RpcSettings, params: &Value) -> Result<Value, String> {
    if settings.fail_calls {
        return Err("eth_call disabled".to_string());
    }

    let call = params.get(0).cloned().unwrap_or_default();
    let data = call
        .get("input")
        .or_else(|| call.get("data"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let raw = data.strip_prefix("0x").unwrap_or(&data);
    let bytes = hex::decode(raw).map_err(|e| e.to_string())?;
    if bytes.len() < 36 {
        return Err("malformed call data".to_string());
    }
    let node = B256::from_slice(&bytes[4..36]);

    if bytes[..4] == RESOLVER_SELECTOR {
        let known = settings.ens.iter().any(|(n, _)| *n == node);
        let resolver = if known { fixtures::ENS_RESOLVER } else { Address::ZERO };
        return Ok(json!(address_word(resolver)));
    }
    if bytes[..4] == ADDR_SELECTOR {
        let resolved = settings
            .ens
            .iter()
            .find(|(n, _)| *n == node)
            .map(|(_, a)| *a)
            .unwrap_or(Address::ZERO);
        return Ok(json!(address_word(resolved)));
    }
    Err("unexpected eth_call selector".to_string())
}

fn address_word(address: Address) -> String {
    format!("0x{}", hex::encode(B256::left_padding_from(address.as_slice())))
}
