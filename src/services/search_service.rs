//! Client search orchestration.
//!
//! Construction loads the record source and rebuilds the index before the
//! service is handed out, so a constructed service always queries an index
//! holding exactly its record set. `search` and `duplicates` are each a single
//! round trip to the engine.

use crate::config::Config;
use crate::engine::SearchEngine;
use crate::error::{EngineResult, ServiceResult};
use crate::index::IndexManager;
use crate::models::{ClientRecord, Fields};
use crate::query::{
    build_duplicates_aggregation, build_search_query, DEFAULT_DUPLICATES_FIELD,
    DEFAULT_SEARCH_FIELD,
};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

/// Name under which the duplicates aggregation is requested and read back.
const DUPLICATES_AGG: &str = "duplicates";

/// One group of records sharing a field value.
///
/// Serializes as `{"<field>": <value>, "count": <n>}`, mirroring the wire
/// shape the controller exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateGroup {
    /// The field the grouping ran over
    pub field: String,

    /// The shared value
    pub value: Value,

    /// How many records carry it (always >= 2)
    pub count: u64,
}

impl Serialize for DuplicateGroup {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(&self.field, &self.value)?;
        map.serialize_entry("count", &self.count)?;
        map.end()
    }
}

/// Keyword search and duplicate detection over a fixed record set.
pub struct ClientSearchService {
    engine: Arc<dyn SearchEngine>,
    index: IndexManager,
    records: Vec<ClientRecord>,
}

impl ClientSearchService {
    /// Construct a service: load records, then rebuild the index.
    ///
    /// `source` overrides the configured record source for this instance; an
    /// absent or empty override falls back to `config.clients_file`. Either a
    /// load failure or an engine failure during the rebuild aborts
    /// construction; there is no partially ready service.
    pub fn new(
        engine: Arc<dyn SearchEngine>,
        config: &Config,
        source: Option<&Path>,
    ) -> ServiceResult<Self> {
        let path = source
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(&config.clients_file));
        let records = crate::store::load_clients(path)?;

        let index = IndexManager::new(engine.clone(), config.index_name.clone());
        index.rebuild(&records)?;

        tracing::info!(
            "Search service ready: {} records indexed into {}",
            records.len(),
            index.name()
        );

        Ok(Self {
            engine,
            index,
            records,
        })
    }

    /// The records loaded at construction, in source order.
    pub fn records(&self) -> &[ClientRecord] {
        &self.records
    }

    /// Search one field for a keyword.
    ///
    /// Defaults to the `full_name` field when `field` is absent or blank.
    /// Returns matched document bodies in engine order; an empty result is a
    /// valid outcome, but engine failures propagate as errors.
    pub fn search(&self, keyword: &Value, field: Option<&str>) -> EngineResult<Vec<Fields>> {
        let field = effective_field(field, DEFAULT_SEARCH_FIELD);
        let body = json!({
            "query": build_search_query(field, keyword)
        });

        let response = self.engine.search(self.index.name(), &body)?;
        Ok(response.hits.hits.into_iter().map(|hit| hit.source).collect())
    }

    /// Group records by a field and return the values shared by two or more.
    ///
    /// Defaults to the `email` field when `field` is absent or blank. Bucket
    /// order is the engine's; the minimum-count filter runs engine-side.
    pub fn duplicates(&self, field: Option<&str>) -> EngineResult<Vec<DuplicateGroup>> {
        let field = effective_field(field, DEFAULT_DUPLICATES_FIELD);
        let body = json!({
            "size": 0,
            "aggs": {
                DUPLICATES_AGG: build_duplicates_aggregation(field)
            }
        });

        let response = self.engine.search(self.index.name(), &body)?;
        let buckets = response
            .aggregations
            .and_then(|mut aggs| aggs.remove(DUPLICATES_AGG))
            .map(|agg| agg.buckets)
            .unwrap_or_default();

        Ok(buckets
            .into_iter()
            .map(|bucket| DuplicateGroup {
                field: field.to_string(),
                value: bucket.key,
                count: bucket.doc_count,
            })
            .collect())
    }
}

/// Resolve an optional field parameter, treating blank strings as absent.
fn effective_field<'a>(field: Option<&'a str>, default: &'a str) -> &'a str {
    match field {
        Some(f) if !f.trim().is_empty() => f,
        _ => default,
    }
}
