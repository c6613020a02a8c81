//! Sello attendance attestation service.
//!
//! Main entry point. Loads and validates configuration, then serves the
//! attestation API until a shutdown signal arrives.

use anyhow::Result;
use sello_api::{start_server, AppState, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with structured logging
    init_tracing();

    info!("Starting Sello attestation service");

    // Load configuration from file and environment
    let config = Config::load()?;
    let organizer = sello_chain::organizer_address(&config.organizer_private_key)?;
    info!(
        rpc_url = %config.rpc_url_masked(),
        organizer = %organizer,
        host = %config.host,
        port = config.port,
        "Configuration loaded"
    );

    let addr = config.parse_server_addr()?;
    let state = AppState::new(config)?;

    start_server(state, addr).await?;

    info!("Sello shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,sello=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
