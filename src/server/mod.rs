//! HTTP controller surface.
//!
//! A pure pass-through over the search service: each route parses its two
//! parameters, builds a service instance (reindexing against the requested
//! source), delegates, and serializes the result. All decisions live in the
//! core; the controller only converts errors into status codes.

pub mod handlers;

use crate::config::Config;
use crate::engine::SearchEngine;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Engine client shared across requests
    pub engine: Arc<dyn SearchEngine>,

    /// Service configuration
    pub config: Arc<Config>,
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/clients/search", get(handlers::search))
        .route("/clients/duplicates", get(handlers::duplicates))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
