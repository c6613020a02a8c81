//! Wire payloads and the attendance record domain model.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Request body accepted by the attestation endpoint.
///
/// Every field is optional on the wire. The recipient is validated by the
/// handler; the event fields fall back to the configured defaults when
/// absent or empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
    /// Recipient wallet address or ENS name.
    #[serde(default)]
    pub recipient: Option<String>,
    /// Event identifier override.
    #[serde(default)]
    pub event_id: Option<String>,
    /// Event title override.
    #[serde(default)]
    pub event_title: Option<String>,
    /// Event date override, decimal unix seconds.
    #[serde(default)]
    pub date: Option<String>,
    /// Event location override.
    #[serde(default)]
    pub location: Option<String>,
}

/// Successful attestation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResponse {
    /// Always `"ok"` on success.
    pub status: String,
    /// Attestation UID as 0x-prefixed hex, or `"unknown"` when the mined
    /// receipt carried no recognizable attestation log.
    pub uid: String,
    /// Transaction hash as 0x-prefixed hex.
    pub tx_hash: String,
}

/// Error body returned for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human-readable error description.
    pub error: String,
    /// Transaction hash, present when the failure happened after the
    /// transaction was submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

/// Default event metadata applied when a check-in request omits fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDefaults {
    /// Event identifier.
    pub event_id: String,
    /// Event title.
    pub event_title: String,
    /// Event date as unix seconds.
    pub date: u64,
    /// Event location.
    pub location: String,
    /// Organizer display name recorded in every attestation.
    pub organizer: String,
}

/// A single attendance claim, ready for on-chain encoding.
///
/// Field order mirrors the registered attestation schema:
/// `string eventID, string eventTitle, uint64 date, string location,
/// string organizer, address attester, bool attended`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    /// Event identifier.
    pub event_id: String,
    /// Event title.
    pub event_title: String,
    /// Event date as unix seconds.
    pub date: u64,
    /// Event location.
    pub location: String,
    /// Organizer display name.
    pub organizer: String,
    /// Address of the attesting organizer wallet.
    pub attester: Address,
    /// Attendance flag. Issued check-ins always record `true`.
    pub attended: bool,
}

impl AttendanceRecord {
    /// Builds a record carrying the configured defaults.
    ///
    /// The attester is the organizer wallet and `attended` is always true;
    /// callers apply per-request overrides on top.
    pub fn from_defaults(defaults: &EventDefaults, attester: Address) -> Self {
        Self {
            event_id: defaults.event_id.clone(),
            event_title: defaults.event_title.clone(),
            date: defaults.date,
            location: defaults.location.clone(),
            organizer: defaults.organizer.clone(),
            attester,
            attended: true,
        }
    }
}
