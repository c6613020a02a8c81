//! HTTP server configuration and request routing.
//!
//! Provides Axum server setup with middleware stack and graceful
//! shutdown. Requests flow through middleware in order:
//! 1. Request ID generation
//! 2. Request/response logging
//! 3. Timeout enforcement
//! 4. Handler execution

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::Config;
use crate::handlers;

/// Shared application state, parsed once at startup.
///
/// Holds no live connections; every check-in request dials its own
/// short-lived chain client from the parsed chain configuration.
#[derive(Clone)]
pub struct AppState {
    /// Full service configuration.
    pub config: Arc<Config>,
    /// Parsed chain configuration handed to per-request clients.
    pub chain: Arc<sello_chain::ChainConfig>,
    /// Event metadata defaults.
    pub defaults: Arc<sello_core::EventDefaults>,
}

impl AppState {
    /// Builds state from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the chain addresses or the schema UID in the
    /// configuration do not parse.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let chain = config.to_chain_config()?;
        let defaults = config.to_event_defaults();
        Ok(Self {
            config: Arc::new(config),
            chain: Arc::new(chain),
            defaults: Arc::new(defaults),
        })
    }
}

/// Creates the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use sello_api::{create_router, AppState, Config};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::load()?;
/// let app = create_router(AppState::new(config)?);
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/live", get(handlers::liveness_check));

    let api_routes = Router::new()
        .route("/api/attest", post(handlers::attest).fallback(handlers::method_not_allowed))
        .route("/checkin", get(handlers::checkin_page));

    let request_timeout = Duration::from_secs(state.config.request_timeout);

    Router::new()
        .merge(health_routes)
        .merge(api_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(state)
}

/// Middleware that tags every request with a unique ID for tracing.
async fn inject_request_id(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("request", request_id = %request_id);

    let mut response = next.run(request).instrument(span).await;
    if let Ok(header_value) = request_id.to_string().parse() {
        response.headers_mut().insert("x-request-id", header_value);
    }
    response
}

/// Starts the HTTP server on the given address.
///
/// Runs until a shutdown signal (SIGTERM or ctrl-c) arrives, then drains
/// in-flight requests before returning.
///
/// # Example
///
/// ```no_run
/// use sello_api::{start_server, AppState, Config};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = Config::load()?;
///     let addr = config.parse_server_addr()?;
///     let state = AppState::new(config)?;
///     start_server(state, addr).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await
}

/// Waits for a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install ctrl-c handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received ctrl-c, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
