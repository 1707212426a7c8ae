use crate::error::{BeaconError, Result};
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiServerConfig,
    /// Notification hub configuration
    pub hub: HubConfig,
    /// Logging configuration
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Port for the API server (default: 8080)
    pub port: u16,
    /// Host to bind to (default: 0.0.0.0)
    pub host: String,
    /// Allowed CORS origins (comma-separated, empty = localhost only)
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Path the monitoring WebSocket is served on
    pub ws_path: String,
    /// Outbound frames buffered per connection before writes are dropped
    pub ws_buffer_size: usize,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: String,
}

impl LogConfig {
    /// Whether log lines should be emitted as JSON
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let ws_path = get_env_or("HUB_WS_PATH", "/ws/monitoring");
        if !ws_path.starts_with('/') {
            return Err(BeaconError::InvalidConfig(
                "HUB_WS_PATH must start with '/'".into(),
            ));
        }

        let ws_buffer_size: usize = get_env_or("HUB_WS_BUFFER_SIZE", "256")
            .parse()
            .map_err(|_| {
                BeaconError::InvalidConfig("HUB_WS_BUFFER_SIZE must be a valid number".into())
            })?;
        if ws_buffer_size == 0 {
            return Err(BeaconError::InvalidConfig(
                "HUB_WS_BUFFER_SIZE must be at least 1".into(),
            ));
        }

        Ok(Config {
            api: ApiServerConfig {
                port: get_env_or("API_PORT", "8080").parse().map_err(|_| {
                    BeaconError::InvalidConfig("API_PORT must be a valid port number".into())
                })?,
                host: get_env_or("API_HOST", "0.0.0.0"),
                cors_origins: get_env_or("CORS_ORIGINS", "")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            hub: HubConfig {
                ws_path,
                ws_buffer_size,
            },
            log: LogConfig {
                level: get_env_or("LOG_LEVEL", "info"),
                format: get_env_or("LOG_FORMAT", "pretty"),
            },
        })
    }

    /// Get the API server address
    pub fn api_addr(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Get environment variable with a default value
fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
