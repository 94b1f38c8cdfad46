//! Discovery tree API server entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use backend::{
    config::Config,
    db_utils::{node_types::BlobNodeTypeSource, search_index::SearchIndexClient},
    server::{AppState, build_router},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded, search service at {}", config.search_service_url);

    let state = AppState {
        search: Arc::new(SearchIndexClient::from_config(&config)),
        node_types: Arc::new(BlobNodeTypeSource::new(config.node_types_url.clone())),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
