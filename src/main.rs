//! Client search service - main entry point.
//!
//! Starts the HTTP controller over the search service. The engine client is
//! shared; each request constructs its own service instance (and therefore
//! rebuilds the index) against the record source it names.

use anyhow::Result;
use client_search_service::engine::SearchEngine;
use client_search_service::server::{build_router, AppState};
use client_search_service::{Config, ElasticClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting client search service against engine at {}",
        config.engine_url
    );
    info!(
        "Managed index: {}, default record source: {}",
        config.index_name, config.clients_file
    );

    let engine = Arc::new(ElasticClient::new(&config)) as Arc<dyn SearchEngine>;

    let state = AppState {
        engine,
        config: Arc::new(config.clone()),
    };
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, router).await?;

    info!("Client search service shutdown complete");
    Ok(())
}
