//! Attestation contract bindings, schema encoding, and receipt log
//! parsing.

use alloy::{
    primitives::{b256, B256},
    rpc::types::Log,
    sol,
    sol_types::{SolEvent, SolValue},
};
use sello_core::AttendanceRecord;

sol! {
    #[sol(rpc)]
    interface IEAS {
        struct AttestationRequestData {
            address recipient;
            uint64 expirationTime;
            bool revocable;
            bytes32 refUID;
            bytes data;
            uint256 value;
        }

        struct AttestationRequest {
            bytes32 schema;
            AttestationRequestData data;
        }

        event Attested(
            address indexed recipient,
            address indexed attester,
            bytes32 uid,
            bytes32 indexed schemaUID
        );

        function attest(AttestationRequest calldata request) external payable returns (bytes32);
    }
}

/// Topic hash of the `Attested` event,
/// `keccak256("Attested(address,address,bytes32,bytes32)")`.
pub const ATTESTED_EVENT_TOPIC: B256 =
    b256!("8bf46bf4cfd674fa735a3d63ec1c9ad4153f033c290341f3a588b75685141b35");

/// Sentinel UID reported when a mined transaction carries no parseable
/// attestation log.
pub const UNKNOWN_UID: &str = "unknown";

/// ABI-encodes an attendance record for the registered schema.
///
/// Produces the parameter-sequence encoding of
/// `(string,string,uint64,string,string,address,bool)`, byte-identical to
/// the schema encoder output attestation indexers expect for
/// `string eventID, string eventTitle, uint64 date, string location,
/// string organizer, address attester, bool attended`.
pub fn encode_attendance_data(record: &AttendanceRecord) -> Vec<u8> {
    (
        record.event_id.clone(),
        record.event_title.clone(),
        record.date,
        record.location.clone(),
        record.organizer.clone(),
        record.attester,
        record.attended,
    )
        .abi_encode_params()
}

/// Extracts the attestation UID from receipt logs.
///
/// Scans for the first log whose topic0 matches the `Attested` signature
/// and prefers decoding the event body, where the canonical contract puts
/// the UID as the only non-indexed field. Contract variants that index the
/// UID instead are covered by falling back to topic slots 2 and 3, in that
/// order. Returns `None` when no matching log exists.
pub fn extract_attested_uid(logs: &[Log]) -> Option<String> {
    let log = logs
        .iter()
        .find(|log| log.inner.data.topics().first() == Some(&ATTESTED_EVENT_TOPIC))?;

    if let Ok(event) = IEAS::Attested::decode_log_data(&log.inner.data) {
        return Some(event.uid.to_string());
    }

    let topics = log.inner.data.topics();
    topics.get(2).or_else(|| topics.get(3)).map(|topic| topic.to_string())
}
