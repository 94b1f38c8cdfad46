//! HTTP routes for the discovery tree API.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use common::discovery_query::DiscoveryTreeQuery;
use serde_json::json;

use crate::{
    api::discovery_tree::{compose_discovery_filters, search_and_filter_discovery_tree},
    db_utils::{node_types::NodeTypeSource, search_index::ResourceSearch},
};

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<dyn ResourceSearch>,
    pub node_types: Arc<dyn NodeTypeSource>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/discovery-tree/search", post(search_discovery_tree))
        .route("/api/discovery-tree/filters", post(discovery_tree_filters))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn _search_discovery_tree(state: AppState, query: DiscoveryTreeQuery) -> anyhow::Result<impl IntoResponse> {
    let results =
        search_and_filter_discovery_tree(query, state.search.as_ref(), state.node_types.as_ref(), Utc::now()).await?;
    Ok(Json(results))
}

pub async fn search_discovery_tree(State(state): State<AppState>, Json(query): Json<DiscoveryTreeQuery>) -> Response {
    match _search_discovery_tree(state, query).await {
        Ok(response) => response.into_response(),
        Err(e) => internal_error("search_discovery_tree", e),
    }
}

async fn _discovery_tree_filters(state: AppState, query: DiscoveryTreeQuery) -> anyhow::Result<impl IntoResponse> {
    let plan = compose_discovery_filters(&query, state.node_types.as_ref(), Utc::now()).await?;
    Ok(Json(plan))
}

pub async fn discovery_tree_filters(State(state): State<AppState>, Json(query): Json<DiscoveryTreeQuery>) -> Response {
    match _discovery_tree_filters(state, query).await {
        Ok(response) => response.into_response(),
        Err(e) => internal_error("discovery_tree_filters", e),
    }
}

fn internal_error(handler: &str, e: anyhow::Error) -> Response {
    tracing::error!("{handler}: request failed: {:#?}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, Body::from(format!("{e:#}"))).into_response()
}
