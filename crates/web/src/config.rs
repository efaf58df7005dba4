//! Application configuration loaded from environment variables.

use std::time::Duration;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `CATALOG_ADDRS` — comma-separated catalog instance addresses
///   (default: `"127.0.0.1:4000"`)
/// - `ORDERS_ADDRS` — comma-separated orders instance addresses
///   (default: `"127.0.0.1:5000"`)
/// - `GATEWAY_TIMEOUT_MS` — per-request gateway deadline (default: `3000`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub catalog_addrs: Vec<String>,
    pub orders_addrs: Vec<String>,
    pub gateway_timeout: Duration,
}

fn parse_addrs(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|addr| addr.trim().to_string())
        .filter(|addr| !addr.is_empty())
        .collect()
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            catalog_addrs: std::env::var("CATALOG_ADDRS")
                .map(|v| parse_addrs(&v))
                .unwrap_or(defaults.catalog_addrs),
            orders_addrs: std::env::var("ORDERS_ADDRS")
                .map(|v| parse_addrs(&v))
                .unwrap_or(defaults.orders_addrs),
            gateway_timeout: std::env::var("GATEWAY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.gateway_timeout),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            catalog_addrs: vec!["127.0.0.1:4000".to_string()],
            orders_addrs: vec!["127.0.0.1:5000".to_string()],
            gateway_timeout: Duration::from_millis(3000),
        }
    }
}
