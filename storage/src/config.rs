//! Connection configuration: connection string, database name and the driver options bag.
//!
//! Loaded from env: MONGODB_URI (required), MONGODB_DATABASE, MONGODB_CONNECT_TIMEOUT_MS,
//! MONGODB_SOCKET_TIMEOUT_MS, LOG_FILE.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_DATABASE: &str = "templates";

/// Options passed through unmodified to the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionOptions {
    pub use_new_url_parser: bool,
    pub use_create_index: bool,
    pub use_unified_topology: bool,
    #[serde(rename = "connectTimeoutMS")]
    pub connect_timeout_ms: u64,
    #[serde(rename = "socketTimeoutMS")]
    pub socket_timeout_ms: u64,
    pub use_find_and_modify: bool,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            use_new_url_parser: true,
            use_create_index: true,
            use_unified_topology: true,
            connect_timeout_ms: 5000,
            socket_timeout_ms: 30000,
            use_find_and_modify: false,
        }
    }
}

/// Storage connection config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub uri: String,
    pub database: String,
    pub options: ConnectionOptions,
    pub log_file: Option<String>,
}

impl StorageConfig {
    /// Loads from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads from an arbitrary variable lookup; `from_env` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let uri = lookup("MONGODB_URI").ok_or_else(|| anyhow::anyhow!("MONGODB_URI not set"))?;
        let database = lookup("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let mut options = ConnectionOptions::default();
        if let Some(ms) = lookup("MONGODB_CONNECT_TIMEOUT_MS") {
            options.connect_timeout_ms = ms
                .parse()
                .with_context(|| format!("MONGODB_CONNECT_TIMEOUT_MS is not a number: {}", ms))?;
        }
        if let Some(ms) = lookup("MONGODB_SOCKET_TIMEOUT_MS") {
            options.socket_timeout_ms = ms
                .parse()
                .with_context(|| format!("MONGODB_SOCKET_TIMEOUT_MS is not a number: {}", ms))?;
        }

        Ok(Self {
            uri,
            database,
            options,
            log_file: lookup("LOG_FILE"),
        })
    }

    /// Builds config with the given connection string; everything else defaulted.
    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: DEFAULT_DATABASE.to_string(),
            options: ConnectionOptions::default(),
            log_file: None,
        }
    }
}
