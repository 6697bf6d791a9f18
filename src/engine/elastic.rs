//! HTTP client for an Elasticsearch-compatible search engine.
//!
//! A synchronous client built on `ureq`; async callers run it through
//! `tokio::task::spawn_blocking`. The client maps transport and status errors
//! to `EngineError` and never retries.

use crate::config::Config;
use crate::engine::{BulkDocument, SearchEngine, SearchResponse};
use crate::error::{EngineError, EngineResult};
use crate::metrics::Metrics;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Response body of a `_bulk` call, reduced to what error handling needs.
#[derive(Debug, Deserialize)]
struct BulkResponse {
    /// Whether any item in the batch failed
    #[serde(default)]
    errors: bool,

    /// Per-item results
    #[serde(default)]
    items: Vec<Value>,
}

/// Synchronous HTTP client for the search engine.
#[derive(Clone)]
pub struct ElasticClient {
    /// Base URL of the engine
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl ElasticClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.engine_url.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Build the URL path segment for an index name.
    fn index_path(index: &str) -> String {
        urlencoding::encode(index).into_owned()
    }

    /// Run a request closure with timing and error accounting.
    fn timed<T>(
        &self,
        run: impl FnOnce() -> Result<T, ureq::Error>,
    ) -> Result<T, EngineError> {
        let start = Instant::now();
        let result = run().map_err(|e| self.map_error(e));
        self.metrics.record_request(start.elapsed());
        if result.is_err() {
            self.metrics.record_error();
        }
        result
    }

    /// Execute a HEAD request, returning the status code.
    fn head(&self, path: &str) -> Result<u16, EngineError> {
        let url = self.build_url(path);
        tracing::debug!("HEAD {}", url);
        self.timed(|| self.agent.head(&url).call())
            .map(|response| response.status())
    }

    /// Execute a PUT request with a JSON body.
    fn put_json(&self, path: &str, body: &Value) -> Result<ureq::Response, EngineError> {
        let url = self.build_url(path);
        tracing::debug!("PUT {}", url);
        self.timed(|| self.agent.put(&url).send_json(body))
    }

    /// Execute a POST request with a JSON body.
    fn post_json(&self, path: &str, body: &Value) -> Result<ureq::Response, EngineError> {
        let url = self.build_url(path);
        tracing::debug!("POST {}", url);
        self.timed(|| self.agent.post(&url).send_json(body))
    }

    /// Execute a POST request with a newline-delimited JSON body.
    fn post_ndjson(&self, path: &str, body: &str) -> Result<ureq::Response, EngineError> {
        let url = self.build_url(path);
        tracing::debug!("POST {} ({} bytes ndjson)", url, body.len());
        self.timed(|| {
            self.agent
                .post(&url)
                .set("Content-Type", "application/x-ndjson")
                .send_string(body)
        })
    }

    /// Execute a POST request with no body.
    fn post_empty(&self, path: &str) -> Result<ureq::Response, EngineError> {
        let url = self.build_url(path);
        tracing::debug!("POST {}", url);
        self.timed(|| self.agent.post(&url).call())
    }

    /// Execute a DELETE request.
    fn delete(&self, path: &str) -> Result<ureq::Response, EngineError> {
        let url = self.build_url(path);
        tracing::debug!("DELETE {}", url);
        self.timed(|| self.agent.delete(&url).call())
    }

    /// Map a ureq error to an EngineError.
    fn map_error(&self, error: ureq::Error) -> EngineError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    404 => EngineError::IndexNotFound(message),
                    _ => EngineError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    EngineError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    EngineError::Timeout
                } else {
                    EngineError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Read and parse a JSON response body.
    fn parse_json<T: serde::de::DeserializeOwned>(
        response: ureq::Response,
    ) -> Result<T, EngineError> {
        let body = response
            .into_string()
            .map_err(|e| EngineError::HttpError(e.to_string()))?;
        serde_json::from_str(&body).map_err(EngineError::JsonError)
    }

    /// Serialize a bulk submission to newline-delimited JSON.
    ///
    /// One action line plus one document line per record, trailing newline
    /// included, as the `_bulk` endpoint requires.
    fn bulk_body(index: &str, documents: &[BulkDocument]) -> EngineResult<String> {
        let mut body = String::new();
        for doc in documents {
            let action = serde_json::json!({
                "index": { "_index": index, "_id": doc.id }
            });
            body.push_str(&serde_json::to_string(&action)?);
            body.push('\n');
            body.push_str(&serde_json::to_string(&doc.source)?);
            body.push('\n');
        }
        Ok(body)
    }

    /// Extract the first failure reason from a bulk response's items.
    fn first_bulk_failure(items: &[Value]) -> String {
        items
            .iter()
            .filter_map(|item| item.as_object())
            .filter_map(|ops| ops.values().next())
            .find_map(|result| result.get("error"))
            .map(|error| error.to_string())
            .unwrap_or_else(|| "Unknown bulk failure".to_string())
    }
}

impl SearchEngine for ElasticClient {
    fn index_exists(&self, index: &str) -> EngineResult<bool> {
        match self.head(&Self::index_path(index)) {
            Ok(_) => Ok(true),
            Err(EngineError::IndexNotFound(_)) => Ok(false),
            Err(other) => Err(other),
        }
    }

    fn create_index(&self, index: &str, body: &Value) -> EngineResult<()> {
        self.put_json(&Self::index_path(index), body)?;
        tracing::info!("Created index {}", index);
        Ok(())
    }

    fn delete_index(&self, index: &str) -> EngineResult<()> {
        self.delete(&Self::index_path(index))?;
        tracing::info!("Deleted index {}", index);
        Ok(())
    }

    fn bulk_index(&self, index: &str, documents: &[BulkDocument]) -> EngineResult<()> {
        let body = Self::bulk_body(index, documents)?;
        let response = self.post_ndjson("_bulk", &body)?;

        let bulk: BulkResponse = Self::parse_json(response)?;
        if bulk.errors {
            return Err(EngineError::BulkRejected(Self::first_bulk_failure(
                &bulk.items,
            )));
        }

        self.metrics.record_documents_indexed(documents.len());
        Ok(())
    }

    fn refresh(&self, index: &str) -> EngineResult<()> {
        self.post_empty(&format!("{}/_refresh", Self::index_path(index)))?;
        Ok(())
    }

    fn search(&self, index: &str, body: &Value) -> EngineResult<SearchResponse> {
        let response = self.post_json(&format!("{}/_search", Self::index_path(index)), body)?;
        self.metrics.record_search();
        Self::parse_json(response)
    }
}
