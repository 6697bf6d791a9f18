//! Client search service - keyword search and duplicate detection over client
//! records, backed by an external full-text search engine.
//!
//! The core is the indexing/query layer: how records are loaded into the
//! index, how a keyword query is translated depending on value type, and how
//! duplicate groups are computed via aggregation. The engine itself (storage,
//! ranking, aggregation execution) stays an external collaborator behind the
//! [`engine::SearchEngine`] contract.
//!
//! # Architecture
//!
//! - **models**: the client record entity with its open field set
//! - **store**: record loading from a JSON source
//! - **engine**: the search engine contract and its HTTP implementation
//! - **index**: lifecycle of the one managed index (wholesale rebuild)
//! - **query**: pure (field, value) to query-document translation
//! - **services**: the orchestrator tying loading, indexing and querying together
//! - **server**: thin HTTP controller over the service
//! - **config**: configuration management from environment variables
//! - **error**: custom error types for precise error handling
//! - **metrics**: counters for engine traffic

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod metrics;
pub mod models;
pub mod query;
pub mod server;
pub mod services;
pub mod store;

pub use config::Config;
pub use engine::{BulkDocument, ElasticClient, SearchEngine, SearchResponse};
pub use error::{ConfigError, EngineError, LoadError, RecordError, ServiceError};
pub use index::IndexManager;
pub use metrics::{Metrics, MetricsSummary};
pub use models::ClientRecord;
pub use query::{build_duplicates_aggregation, build_search_query};
pub use services::{ClientSearchService, DuplicateGroup};
