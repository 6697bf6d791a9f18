//! Error types for the client search service.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when talking to the search engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Engine returned an error status code
    #[error("Engine error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Index does not exist
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// One or more operations in a bulk submission were rejected
    #[error("Bulk indexing failed: {0}")]
    BulkRejected(String),

    /// Generic engine error with context
    #[error("Engine error: {0}")]
    Other(String),
}

/// Errors that can occur while loading client records from a source file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Source file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Source file is not a well-formed JSON array of flat mappings
    #[error("Malformed client data in {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record is missing the mandatory `id` field
    #[error("Record at position {position} has no id field")]
    MissingId { position: usize },
}

/// Errors raised by explicit field access on a client record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    /// The requested field was never declared on this record.
    ///
    /// Distinct from a field that is present with a null or empty value.
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Errors surfaced by the search service orchestrator.
///
/// Construction can fail either while loading records or while rebuilding the
/// index; both are fatal and leave no partially ready service behind.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Record loading failed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Engine lifecycle or query call failed
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Convenience type alias for Results with EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Convenience type alias for Results with LoadError
pub type LoadResult<T> = Result<T, LoadError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;
