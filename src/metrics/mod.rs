//! Basic metrics instrumentation for the engine client.
//!
//! Provides counters and duration tracking for engine requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector for tracking engine traffic.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    /// Total number of engine requests made
    requests_total: Arc<AtomicU64>,

    /// Total number of engine request errors
    errors_total: Arc<AtomicU64>,

    /// Total duration of all engine requests in milliseconds
    duration_total_ms: Arc<AtomicU64>,

    /// Number of documents submitted for indexing
    documents_indexed_total: Arc<AtomicU64>,

    /// Number of search bodies executed
    searches_total: Arc<AtomicU64>,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an engine request with duration.
    pub fn record_request(&self, duration: Duration) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an engine request error.
    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record documents submitted in a bulk operation.
    pub fn record_documents_indexed(&self, count: usize) {
        self.documents_indexed_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record an executed search.
    pub fn record_search(&self) {
        self.searches_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a point-in-time snapshot of all counters.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            errors_total: self.errors_total.load(Ordering::Relaxed),
            duration_total_ms: self.duration_total_ms.load(Ordering::Relaxed),
            documents_indexed_total: self.documents_indexed_total.load(Ordering::Relaxed),
            searches_total: self.searches_total.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of collected metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSummary {
    pub requests_total: u64,
    pub errors_total: u64,
    pub duration_total_ms: u64,
    pub documents_indexed_total: u64,
    pub searches_total: u64,
}
