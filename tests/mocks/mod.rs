//! In-memory search engine mock for orchestration tests.
//!
//! Tracks every call in order, stores bulk-indexed documents, and replays
//! queued search responses, so tests can assert the exact lifecycle sequence
//! and query bodies without a running engine.

use client_search_service::engine::{BulkDocument, SearchEngine, SearchResponse};
use client_search_service::error::{EngineError, EngineResult};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock search engine for testing.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockSearchEngine {
    /// Whether the index currently exists
    index_exists: Arc<Mutex<bool>>,

    /// Documents currently held by the index
    documents: Arc<Mutex<Vec<BulkDocument>>>,

    /// Queued responses returned by successive `search` calls
    search_responses: Arc<Mutex<VecDeque<SearchResponse>>>,

    /// Captured bodies of every `search` call
    search_bodies: Arc<Mutex<Vec<Value>>>,

    /// Ordered log of every engine call
    calls: Arc<Mutex<Vec<String>>>,

    /// Method name that should fail with an injected error
    fail_on: Arc<Mutex<Option<String>>>,
}

#[allow(dead_code)]
impl MockSearchEngine {
    /// Create a mock with no pre-existing index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose index already exists (stale prior generation).
    pub fn with_existing_index() -> Self {
        let mock = Self::default();
        *mock.index_exists.lock().unwrap() = true;
        mock
    }

    /// Queue a response for the next `search` call.
    ///
    /// Panics if `raw` is not a valid search response body.
    pub fn queue_search_response(&self, raw: Value) {
        let response: SearchResponse =
            serde_json::from_value(raw).expect("invalid canned search response");
        self.search_responses.lock().unwrap().push_back(response);
    }

    /// Make the named method fail with an injected engine error.
    pub fn fail_on(&self, method: &str) {
        *self.fail_on.lock().unwrap() = Some(method.to_string());
    }

    /// The ordered list of calls made so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times the named method was called.
    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.as_str() == method)
            .count()
    }

    /// Documents currently held by the index.
    pub fn documents(&self) -> Vec<BulkDocument> {
        self.documents.lock().unwrap().clone()
    }

    /// The body of the most recent `search` call.
    pub fn last_search_body(&self) -> Option<Value> {
        self.search_bodies.lock().unwrap().last().cloned()
    }

    /// All captured `search` bodies, in call order.
    pub fn search_bodies(&self) -> Vec<Value> {
        self.search_bodies.lock().unwrap().clone()
    }

    fn record(&self, method: &str) -> EngineResult<()> {
        self.calls.lock().unwrap().push(method.to_string());
        let fail = self.fail_on.lock().unwrap();
        match fail.as_deref() {
            Some(target) if target == method => Err(EngineError::Other(format!(
                "Injected failure in {}",
                method
            ))),
            _ => Ok(()),
        }
    }
}

impl SearchEngine for MockSearchEngine {
    fn index_exists(&self, _index: &str) -> EngineResult<bool> {
        self.record("index_exists")?;
        Ok(*self.index_exists.lock().unwrap())
    }

    fn create_index(&self, _index: &str, _body: &Value) -> EngineResult<()> {
        self.record("create_index")?;
        *self.index_exists.lock().unwrap() = true;
        self.documents.lock().unwrap().clear();
        Ok(())
    }

    fn delete_index(&self, _index: &str) -> EngineResult<()> {
        self.record("delete_index")?;
        *self.index_exists.lock().unwrap() = false;
        self.documents.lock().unwrap().clear();
        Ok(())
    }

    fn bulk_index(&self, _index: &str, documents: &[BulkDocument]) -> EngineResult<()> {
        self.record("bulk_index")?;
        self.documents
            .lock()
            .unwrap()
            .extend(documents.iter().cloned());
        Ok(())
    }

    fn refresh(&self, _index: &str) -> EngineResult<()> {
        self.record("refresh")
    }

    fn search(&self, _index: &str, body: &Value) -> EngineResult<SearchResponse> {
        self.record("search")?;
        self.search_bodies.lock().unwrap().push(body.clone());
        Ok(self
            .search_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}
