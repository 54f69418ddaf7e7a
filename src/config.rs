//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote product catalog
    pub catalog_base_url: String,
    /// Seconds before a cached catalog entry must be re-fetched
    pub stale_after_secs: u64,
    /// Timeout in seconds for a single catalog fetch
    pub fetch_timeout_secs: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CATALOG_BASE_URL` - Remote catalog root (default: https://fakestoreapi.com)
    /// - `STALE_AFTER_SECS` - Staleness window in seconds (default: 300)
    /// - `FETCH_TIMEOUT_SECS` - Catalog fetch timeout in seconds (default: 10)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            catalog_base_url: env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| "https://fakestoreapi.com".to_string()),
            stale_after_secs: env::var("STALE_AFTER_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_base_url: "https://fakestoreapi.com".to_string(),
            stale_after_secs: 300,
            fetch_timeout_secs: 10,
            server_port: 3000,
        }
    }
}
