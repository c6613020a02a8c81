//! Integration tests for the health check endpoints.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sello_api::{create_router, AppState, Config};
use sello_testing::{fixtures, MockRpc};
use serde_json::Value;
use tower::ServiceExt;

fn test_config(rpc_url: &str) -> Config {
    Config {
        rpc_url: rpc_url.to_string(),
        organizer_private_key: fixtures::ORGANIZER_KEY.to_string(),
        schema_uid: fixtures::SCHEMA_UID.to_string(),
        eas_address: fixtures::EAS_ADDRESS.to_string(),
        ens_registry: fixtures::ENS_REGISTRY.to_string(),
        receipt_poll_interval_ms: 10,
        receipt_poll_attempts: 3,
        event_id: String::new(),
        event_title: String::new(),
        event_date_unix: 0,
        event_location: String::new(),
        event_organizer: String::new(),
        host: "127.0.0.1".to_string(),
        port: 8080,
        request_timeout: 30,
        rust_log: "info".to_string(),
    }
}

async fn get_json(rpc_url: &str, path: &str) -> (StatusCode, Value) {
    let state = AppState::new(test_config(rpc_url)).expect("state");
    let response = create_router(state)
        .oneshot(Request::builder().uri(path).body(Body::empty()).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

#[tokio::test]
async fn health_reports_rpc_connectivity() {
    let rpc = MockRpc::start().await;
    let (status, body) = get_json(&rpc.uri(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["rpc"]["status"], "up");
    assert_eq!(body["checks"]["rpc"]["chain_id"], sello_testing::rpc::CHAIN_ID);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn health_degrades_when_rpc_is_unreachable() {
    // Port 1 refuses connections immediately.
    let (status, body) = get_json("http://127.0.0.1:1", "/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["rpc"]["status"], "down");
    assert!(body["checks"]["rpc"]["message"]
        .as_str()
        .unwrap_or_default()
        .contains("RPC connection failed"));
}

#[tokio::test]
async fn readiness_mirrors_health() {
    let rpc = MockRpc::start().await;
    let (status, body) = get_json(&rpc.uri(), "/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn liveness_never_touches_the_rpc_endpoint() {
    let rpc = MockRpc::start().await;
    let (status, body) = get_json(&rpc.uri(), "/live").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
    assert_eq!(body["service"], "sello-api");
    assert_eq!(rpc.total_requests().await, 0);
}
