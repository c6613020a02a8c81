//! Configuration for the attestation service.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{Address, B256};
use anyhow::{Context, Result};
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use sello_chain::ChainConfig;
use sello_core::EventDefaults;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Complete service configuration.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
///
/// Four values have no default and must always be provided: the RPC
/// endpoint, the organizer private key, the schema UID, and the
/// attestation contract address. Loading fails fast when any of them is
/// missing or malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON-RPC endpoint URL of the target chain.
    ///
    /// Environment variable: `RPC_URL`
    #[serde(alias = "RPC_URL")]
    pub rpc_url: String,

    /// Organizer wallet private key as hex. Signs every attestation and
    /// pays for gas. Never logged.
    ///
    /// Environment variable: `ORGANIZER_PRIVATE_KEY`
    #[serde(alias = "ORGANIZER_PRIVATE_KEY")]
    pub organizer_private_key: String,

    /// UID of the registered attendance schema, a 32-byte hex value.
    ///
    /// Environment variable: `SCHEMA_UID`
    #[serde(alias = "SCHEMA_UID")]
    pub schema_uid: String,

    /// Address of the attestation contract on the target chain.
    ///
    /// Environment variable: `EAS_ADDRESS`
    #[serde(alias = "EAS_ADDRESS")]
    pub eas_address: String,

    /// ENS registry address used for name resolution.
    ///
    /// Environment variable: `ENS_REGISTRY`
    #[serde(default = "default_ens_registry", alias = "ENS_REGISTRY")]
    pub ens_registry: String,

    /// Delay between receipt polls in milliseconds.
    ///
    /// Environment variable: `RECEIPT_POLL_INTERVAL_MS`
    #[serde(default = "default_receipt_poll_interval_ms", alias = "RECEIPT_POLL_INTERVAL_MS")]
    pub receipt_poll_interval_ms: u64,

    /// Maximum number of receipt polls before giving up.
    ///
    /// Environment variable: `RECEIPT_POLL_ATTEMPTS`
    #[serde(default = "default_receipt_poll_attempts", alias = "RECEIPT_POLL_ATTEMPTS")]
    pub receipt_poll_attempts: u32,

    /// Default event identifier recorded when a request omits one.
    ///
    /// Environment variable: `EVENT_ID`
    #[serde(default, alias = "EVENT_ID")]
    pub event_id: String,

    /// Default event title.
    ///
    /// Environment variable: `EVENT_TITLE`
    #[serde(default, alias = "EVENT_TITLE")]
    pub event_title: String,

    /// Default event date as unix seconds.
    ///
    /// Environment variable: `EVENT_DATE_UNIX`
    #[serde(default, alias = "EVENT_DATE_UNIX")]
    pub event_date_unix: u64,

    /// Default event location.
    ///
    /// Environment variable: `EVENT_LOCATION`
    #[serde(default, alias = "EVENT_LOCATION")]
    pub event_location: String,

    /// Organizer display name recorded in every attestation.
    ///
    /// Environment variable: `EVENT_ORGANIZER`
    #[serde(default, alias = "EVENT_ORGANIZER")]
    pub event_organizer: String,

    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,

    /// Server port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,

    /// Request timeout in seconds. Must cover the whole receipt polling
    /// window or slow confirmations get cut off mid-request.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

fn default_ens_registry() -> String {
    sello_chain::DEFAULT_ENS_REGISTRY.to_string()
}

fn default_receipt_poll_interval_ms() -> u64 {
    2000
}

fn default_receipt_poll_attempts() -> u32 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    120
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from config file and environment overrides.
    pub fn load() -> Result<Self> {
        let figment = Figment::new().merge(Toml::file(CONFIG_FILE)).merge(Env::prefixed(""));
        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Converts to the chain client configuration, parsing the hex fields.
    pub fn to_chain_config(&self) -> Result<ChainConfig> {
        let schema_uid = B256::from_str(self.schema_uid.trim())
            .context("SCHEMA_UID must be a 32-byte hex value")?;
        let eas_address = Address::from_str(self.eas_address.trim())
            .context("EAS_ADDRESS must be a 20-byte hex address")?;
        let ens_registry = Address::from_str(self.ens_registry.trim())
            .context("ENS_REGISTRY must be a 20-byte hex address")?;

        Ok(ChainConfig {
            rpc_url: self.rpc_url.clone(),
            organizer_key: self.organizer_private_key.clone(),
            eas_address,
            schema_uid,
            ens_registry,
            receipt_poll_interval: Duration::from_millis(self.receipt_poll_interval_ms),
            receipt_poll_attempts: self.receipt_poll_attempts,
        })
    }

    /// Event metadata defaults applied to requests that omit fields.
    pub fn to_event_defaults(&self) -> EventDefaults {
        EventDefaults {
            event_id: self.event_id.clone(),
            event_title: self.event_title.clone(),
            date: self.event_date_unix,
            location: self.event_location.clone(),
            organizer: self.event_organizer.clone(),
        }
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str)
            .with_context(|| format!("Invalid server address: {addr_str}"))
    }

    /// RPC endpoint with any path component masked, safe for logging.
    ///
    /// Hosted RPC providers put API keys in the URL path.
    pub fn rpc_url_masked(&self) -> String {
        match self.rpc_url.split_once("://") {
            Some((scheme, rest)) => match rest.split_once('/') {
                Some((host, path)) if !path.is_empty() => format!("{scheme}://{host}/***"),
                _ => self.rpc_url.clone(),
            },
            None => "***".to_string(),
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() {
            anyhow::bail!("RPC_URL must not be empty");
        }
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }
        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }
        if self.receipt_poll_attempts == 0 {
            anyhow::bail!("receipt_poll_attempts must be greater than 0");
        }
        sello_chain::organizer_address(&self.organizer_private_key)
            .context("ORGANIZER_PRIVATE_KEY is not a valid private key")?;
        self.to_chain_config()?;
        Ok(())
    }
}
