//! FILENAME: app/server/src/config.rs
//! Server configuration.
//!
//! Loaded from environment variables with defaults suited to local runs.

use std::net::SocketAddr;
use std::path::PathBuf;

use log::LevelFilter;

use crate::error::ApiError;

/// First path segment of the fetch route.
pub const DEFAULT_NAMESPACE: &str = "bioreactor";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_host: String,

    /// Port to bind.
    pub port: String,

    /// First segment of `/api/{namespace}/fetch`.
    pub namespace: String,

    /// Table served by the route; its columns are projected when a request
    /// names no fields.
    pub table: String,
    pub columns: Vec<String>,

    /// JSON array of source rows. `None` serves an empty in-memory source.
    pub data_path: Option<PathBuf>,

    /// Optional file mirroring the unified log.
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: "3000".to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            table: DEFAULT_NAMESPACE.to_string(),
            columns: Vec::new(),
            data_path: None,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl ServerConfig {
    /// Create ServerConfig from environment variables.
    ///
    /// Environment variables:
    /// - `BI_BIND`: Interface to bind (default: 0.0.0.0)
    /// - `PORT` or `BI_PORT`: Port (default: 3000)
    /// - `BI_NAMESPACE`: Route namespace (default: bioreactor)
    /// - `BI_TABLE`: Table name (default: bioreactor)
    /// - `BI_COLUMNS`: Comma-separated column names (default: none)
    /// - `BI_DATA_PATH`: JSON file with the source rows
    /// - `BI_LOG_FILE`: Log file path
    /// - `BI_LOG_LEVEL`: off/error/warn/info/debug/trace (default: info)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` uses the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let columns = non_empty("BI_COLUMNS")
            .map(|s| {
                s.split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let log_level = non_empty("BI_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.log_level);

        Self {
            bind_host: non_empty("BI_BIND").unwrap_or(defaults.bind_host),
            port: non_empty("PORT")
                .or_else(|| non_empty("BI_PORT"))
                .unwrap_or(defaults.port),
            namespace: non_empty("BI_NAMESPACE").unwrap_or(defaults.namespace),
            table: non_empty("BI_TABLE").unwrap_or(defaults.table),
            columns,
            data_path: non_empty("BI_DATA_PATH").map(PathBuf::from),
            log_file: non_empty("BI_LOG_FILE").map(PathBuf::from),
            log_level,
        }
    }

    /// Resolves the socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ApiError> {
        let port = self
            .port
            .parse::<u16>()
            .map_err(|_| ApiError::InvalidConfig(format!("Invalid port value: {}", self.port)))?;

        let addr = format!("{}:{}", self.bind_host, port);
        addr.parse::<SocketAddr>()
            .map_err(|e| ApiError::InvalidConfig(format!("Invalid bind address {}: {}", addr, e)))
    }
}
