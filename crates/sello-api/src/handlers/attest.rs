//! Attestation endpoint handler.
//!
//! Resolves the recipient, verifies organizer funding, submits the
//! attestation transaction, and recovers the attestation UID from the
//! receipt.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sello_chain::{ChainClient, ChainError};
use sello_core::{AttendanceRecord, CheckinRequest, CheckinResponse, ErrorBody};
use tracing::{error, info, instrument, warn};

use crate::server::AppState;

/// Issues an attendance attestation to the requested recipient.
///
/// Returns 400 when the recipient is missing or does not resolve, 500 for
/// funding, submission, and receipt failures. Post-submission failures
/// carry the transaction hash in the error body.
#[instrument(name = "attest", skip_all)]
pub async fn attest(State(state): State<AppState>, Json(body): Json<CheckinRequest>) -> Response {
    let Some(recipient_input) =
        body.recipient.as_deref().map(str::trim).filter(|input| !input.is_empty())
    else {
        warn!("check-in request without recipient");
        return error_response(StatusCode::BAD_REQUEST, "Missing recipient address or ENS", None);
    };

    let client = match ChainClient::connect(&state.chain).await {
        Ok(client) => client,
        Err(e) => return chain_error_response(&e),
    };

    let Some(recipient) = client.resolve_recipient(recipient_input).await else {
        warn!(recipient = recipient_input, "recipient did not resolve");
        return error_response(StatusCode::BAD_REQUEST, "Invalid address or ENS name", None);
    };
    info!(recipient = %recipient, "recipient resolved");

    let balance = match client.organizer_balance().await {
        Ok(balance) => balance,
        Err(e) => return chain_error_response(&e),
    };
    if balance.is_zero() {
        return chain_error_response(&ChainError::ZeroBalance { organizer: client.organizer() });
    }

    let record = match build_record(&state, &body, &client) {
        Ok(record) => record,
        Err(message) => {
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, message, None);
        }
    };

    let tx_hash = match client.submit_attestation(recipient, &record).await {
        Ok(tx_hash) => tx_hash,
        Err(e) => return chain_error_response(&e),
    };

    let outcome = match client.wait_for_attestation(tx_hash).await {
        Ok(outcome) => outcome,
        Err(e) => return chain_error_response(&e),
    };

    info!(uid = %outcome.uid, tx_hash = %outcome.tx_hash, "attestation issued");
    (
        StatusCode::OK,
        Json(CheckinResponse {
            status: "ok".to_string(),
            uid: outcome.uid,
            tx_hash: outcome.tx_hash.to_string(),
        }),
    )
        .into_response()
}

/// Rejects non-POST methods on the attestation route.
pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None)
}

/// Builds the attendance record from request overrides on top of the
/// configured defaults. Empty strings count as absent, matching the
/// fallback behavior of the check-in form.
fn build_record(
    state: &AppState,
    body: &CheckinRequest,
    client: &ChainClient,
) -> Result<AttendanceRecord, String> {
    let defaults = &state.defaults;
    let date = match body.date.as_deref().filter(|date| !date.is_empty()) {
        Some(raw) => raw.parse::<u64>().map_err(|e| format!("invalid date value {raw:?}: {e}"))?,
        None => defaults.date,
    };

    let mut record = AttendanceRecord::from_defaults(defaults, client.organizer());
    record.event_id = override_or(&body.event_id, &defaults.event_id);
    record.event_title = override_or(&body.event_title, &defaults.event_title);
    record.location = override_or(&body.location, &defaults.location);
    record.date = date;

    Ok(record)
}

fn override_or(value: &Option<String>, default: &str) -> String {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(default).to_string()
}

fn chain_error_response(error: &ChainError) -> Response {
    error!(%error, "attestation request failed");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        error.to_string(),
        error.tx_hash().map(|hash| hash.to_string()),
    )
}

fn error_response(
    status: StatusCode,
    message: impl Into<String>,
    tx_hash: Option<String>,
) -> Response {
    (status, Json(ErrorBody { error: message.into(), tx_hash })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_defaults_only_when_non_empty() {
        assert_eq!(override_or(&Some("devcon-7".to_string()), "fallback"), "devcon-7");
        assert_eq!(override_or(&Some(String::new()), "fallback"), "fallback");
        assert_eq!(override_or(&None, "fallback"), "fallback");
    }

    #[tokio::test]
    async fn method_not_allowed_matches_the_wire_shape() {
        let response = method_not_allowed().await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(value, serde_json::json!({ "error": "Method not allowed" }));
    }
}
