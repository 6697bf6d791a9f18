//! Search engine access.
//!
//! The engine is an external collaborator reached over its HTTP protocol. This
//! module pins down the narrow contract the rest of the crate relies on: index
//! lifecycle calls plus query execution returning a typed result envelope. The
//! engine's storage, ranking and aggregation execution are never reimplemented
//! here.

mod elastic;
pub use elastic::ElasticClient;

use crate::error::EngineResult;
use crate::models::Fields;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// One document in a bulk submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkDocument {
    /// Index document identifier
    pub id: String,

    /// Document body
    pub source: Fields,
}

/// Result envelope returned by query execution.
///
/// A search body either matches documents (`hits`) or carries named
/// aggregations (`aggregations`), or both; absent parts deserialize to their
/// empty forms.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchResponse {
    /// Matched documents, in engine order
    #[serde(default)]
    pub hits: Hits,

    /// Named aggregation results
    #[serde(default)]
    pub aggregations: Option<HashMap<String, Aggregation>>,
}

/// The `hits` section of a search response.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Hits {
    /// Ordered list of matched documents
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// One matched document.
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    /// Document identifier
    #[serde(rename = "_id", default)]
    pub id: String,

    /// Document body as indexed
    #[serde(rename = "_source", default)]
    pub source: Fields,
}

/// One named aggregation result.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Aggregation {
    /// Grouping buckets, in engine order
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

/// One terms-aggregation bucket.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Bucket {
    /// The distinct field value this bucket groups
    pub key: Value,

    /// Number of documents carrying that value
    pub doc_count: u64,
}

/// The engine operations this crate depends on.
///
/// `ElasticClient` implements the contract over HTTP; tests substitute
/// in-memory implementations. All calls are single blocking round trips and
/// errors propagate without retries.
pub trait SearchEngine: Send + Sync {
    /// Whether an index with the given name exists.
    fn index_exists(&self, index: &str) -> EngineResult<bool>;

    /// Create an index with the given settings/mappings body.
    fn create_index(&self, index: &str, body: &Value) -> EngineResult<()>;

    /// Delete an index.
    fn delete_index(&self, index: &str) -> EngineResult<()>;

    /// Submit documents in one batched operation.
    fn bulk_index(&self, index: &str, documents: &[BulkDocument]) -> EngineResult<()>;

    /// Make recently written documents visible to subsequent searches.
    fn refresh(&self, index: &str) -> EngineResult<()>;

    /// Execute a search body against an index.
    fn search(&self, index: &str, body: &Value) -> EngineResult<SearchResponse>;
}
