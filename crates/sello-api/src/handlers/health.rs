//! Health check handlers for service monitoring.
//!
//! Provides liveness, readiness, and health endpoints for orchestration
//! systems. Health and readiness probe the configured RPC endpoint with a
//! chain id query; liveness touches nothing external.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, instrument};

use crate::server::AppState;

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service health status
    pub status: HealthStatus,
    /// Timestamp when health check was performed
    pub timestamp: DateTime<Utc>,
    /// Individual component health checks
    pub checks: HealthChecks,
    /// Service version information
    pub version: String,
}

/// Overall health status enumeration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All systems operational
    Healthy,
    /// Critical systems failing
    Unhealthy,
}

/// Individual component health check results.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// RPC endpoint connectivity and chain identity
    pub rpc: ComponentHealth,
}

/// Health status for individual components.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    /// Component status
    pub status: ComponentStatus,
    /// Optional error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Chain id reported by the endpoint, when reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

/// Component-level health status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    /// Component is healthy
    Up,
    /// Component is experiencing issues
    Down,
}

/// Health check endpoint handler.
///
/// Designed to be called frequently by load balancers and orchestration
/// systems, so it performs no signing or stateful work.
#[instrument(name = "health_check", skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Response {
    debug!("Performing health check");

    let started = Instant::now();
    let rpc = match sello_chain::probe_rpc(&state.config.rpc_url).await {
        Ok(chain_id) => ComponentHealth {
            status: ComponentStatus::Up,
            message: None,
            chain_id: Some(chain_id),
            response_time_ms: elapsed_ms(started),
        },
        Err(e) => {
            error!("RPC health check failed: {}", e);
            ComponentHealth {
                status: ComponentStatus::Down,
                message: Some(format!("RPC connection failed: {e}")),
                chain_id: None,
                response_time_ms: elapsed_ms(started),
            }
        }
    };

    let healthy = matches!(rpc.status, ComponentStatus::Up);
    let status_code = if healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    let response = HealthResponse {
        status: if healthy { HealthStatus::Healthy } else { HealthStatus::Unhealthy },
        timestamp: Utc::now(),
        checks: HealthChecks { rpc },
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status_code, Json(response)).into_response()
}

/// Readiness check endpoint for orchestration probes.
///
/// Ready means the service can reach its RPC endpoint, so this delegates
/// to the health check.
#[instrument(name = "readiness_check", skip(state))]
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    health_check(State(state)).await
}

/// Liveness check endpoint.
///
/// Minimal check that the process is responsive; touches no external
/// dependencies.
#[instrument(name = "liveness_check", skip_all)]
pub async fn liveness_check() -> Response {
    debug!("Performing liveness check");

    let response = serde_json::json!({
        "status": "alive",
        "timestamp": Utc::now(),
        "service": "sello-api"
    });

    (StatusCode::OK, Json(response)).into_response()
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
