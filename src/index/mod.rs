//! Index lifecycle management.
//!
//! One named index holds one document per client record. The only operation is
//! a wholesale rebuild: delete the index if it exists, create it fresh, bulk
//! load every record, then refresh so the documents are visible to the next
//! search. There is no incremental update path.

use crate::engine::{BulkDocument, SearchEngine};
use crate::error::EngineResult;
use crate::models::ClientRecord;
use serde_json::{json, Value};
use std::sync::Arc;

/// Mappings body for the client index.
///
/// Every string field is indexed as analyzed text with a raw `keyword`
/// sub-field, which the wildcard queries and terms aggregations rely on. The
/// template makes that contract explicit instead of inheriting it from the
/// engine's default dynamic mapping.
pub fn index_mapping() -> Value {
    json!({
        "mappings": {
            "dynamic_templates": [
                {
                    "strings_with_keyword": {
                        "match_mapping_type": "string",
                        "mapping": {
                            "type": "text",
                            "fields": {
                                "keyword": {
                                    "type": "keyword",
                                    "ignore_above": 256
                                }
                            }
                        }
                    }
                }
            ]
        }
    })
}

/// Owns the lifecycle of the named client index.
///
/// Purely lifecycle management; query serving goes through the engine
/// directly.
pub struct IndexManager {
    engine: Arc<dyn SearchEngine>,
    index_name: String,
}

impl IndexManager {
    /// Create a manager for the given index name.
    pub fn new(engine: Arc<dyn SearchEngine>, index_name: String) -> Self {
        Self { engine, index_name }
    }

    /// The name of the managed index.
    pub fn name(&self) -> &str {
        &self.index_name
    }

    /// Replace the index contents with exactly the given records.
    ///
    /// Delete-if-exists, create, bulk load, refresh — in that order. Any
    /// engine error aborts the rebuild and propagates; callers must treat a
    /// failed rebuild as fatal. The four calls are not atomic: two rebuilds
    /// racing on the same engine leave whichever bulk-load finished last.
    pub fn rebuild(&self, records: &[ClientRecord]) -> EngineResult<()> {
        if self.engine.index_exists(&self.index_name)? {
            self.engine.delete_index(&self.index_name)?;
        }
        self.engine.create_index(&self.index_name, &index_mapping())?;

        // The bulk endpoint rejects an empty body; an empty record set is
        // fully represented by the freshly created empty index.
        if !records.is_empty() {
            let documents: Vec<BulkDocument> = records
                .iter()
                .map(|record| BulkDocument {
                    id: record.id().to_string(),
                    source: record.as_document().clone(),
                })
                .collect();
            self.engine.bulk_index(&self.index_name, &documents)?;
        }

        self.engine.refresh(&self.index_name)?;

        tracing::info!(
            "Rebuilt index {} with {} documents",
            self.index_name,
            records.len()
        );
        Ok(())
    }
}
