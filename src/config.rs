//! Configuration management for the client search service.
//!
//! This module handles loading and validating configuration from environment
//! variables. Every value has a default so the service can run against a local
//! Elasticsearch with no environment at all.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default search engine endpoint.
pub const DEFAULT_ENGINE_URL: &str = "http://localhost:9200";

/// Default name of the managed index.
pub const DEFAULT_INDEX_NAME: &str = "idx_clients";

/// Default client record source shipped with the repository.
pub const DEFAULT_CLIENTS_FILE: &str = "data/clients.json";

/// Configuration for the client search service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the search engine
    pub engine_url: String,

    /// Name of the index holding client documents
    pub index_name: String,

    /// Path to the default client record source
    pub clients_file: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Address the HTTP controller binds to
    pub bind_address: String,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `ELASTICSEARCH_URL`: Search engine base URL (default: `http://localhost:9200`)
    /// - `INDEX_NAME`: Managed index name (default: `idx_clients`)
    /// - `CLIENTS_FILE`: Default record source path (default: `data/clients.json`)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `BIND_ADDRESS`: Controller bind address (default: `127.0.0.1:8080`)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env if present, without failing when it is absent
        let _ = dotenvy::dotenv();

        let engine_url =
            env::var("ELASTICSEARCH_URL").unwrap_or_else(|_| DEFAULT_ENGINE_URL.to_string());

        if !engine_url.starts_with("http://") && !engine_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "ELASTICSEARCH_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let index_name = env::var("INDEX_NAME").unwrap_or_else(|_| DEFAULT_INDEX_NAME.to_string());
        if index_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "INDEX_NAME".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let clients_file =
            env::var("CLIENTS_FILE").unwrap_or_else(|_| DEFAULT_CLIENTS_FILE.to_string());
        if clients_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CLIENTS_FILE".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            engine_url,
            index_name,
            clients_file,
            request_timeout,
            bind_address,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            engine_url: DEFAULT_ENGINE_URL.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            clients_file: DEFAULT_CLIENTS_FILE.to_string(),
            request_timeout: 10,
            bind_address: "127.0.0.1:8080".to_string(),
            log_level: "info".to_string(),
        }
    }
}
