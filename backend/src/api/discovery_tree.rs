//! Search and filter the discovery tree resources.

use anyhow::Context;
use chrono::{DateTime, Utc};
use common::{discovery_query::DiscoveryTreeQuery, discovery_result::DiscoveryTreeResults};
use tracing::info;

use crate::{
    db_utils::{
        node_types::NodeTypeSource,
        search_index::{ResourceSearch, to_discovery_resource},
    },
    discovery::{
        DiscoveryPlan, NodeTypeRegistry,
        plan::{plan_discovery_query, requires_node_types},
    },
};

/// Composes the per-content-type filters for `query` without searching.
pub async fn compose_discovery_filters(
    query: &DiscoveryTreeQuery,
    node_types: &dyn NodeTypeSource,
    now: DateTime<Utc>,
) -> anyhow::Result<DiscoveryPlan> {
    let registry = if requires_node_types(query) {
        NodeTypeRegistry::from_node_types(node_types.fetch_node_types().await?)
    } else {
        NodeTypeRegistry::default()
    };
    let plan = plan_discovery_query(query, &registry, now).context("Failed to compose discovery tree filters")?;
    Ok(plan)
}

/// Runs one search per planned content type, one after another.
pub async fn search_and_filter_discovery_tree(
    query: DiscoveryTreeQuery,
    search: &dyn ResourceSearch,
    node_types: &dyn NodeTypeSource,
    now: DateTime<Utc>,
) -> anyhow::Result<DiscoveryTreeResults> {
    let plan = compose_discovery_filters(&query, node_types, now).await?;
    if plan.is_empty() {
        info!("discovery tree search: nothing selected, no content types queried");
        return Ok(DiscoveryTreeResults::default());
    }
    info!(
        "discovery tree search: {} selected filters, {} content types to query",
        query.selected_filters.len(),
        plan.queries.len()
    );

    let mut results = DiscoveryTreeResults::default();
    for (content_type, filter) in plan.queries {
        info!("searching {content_type} with filter {filter:?}");
        let records = search.search(content_type, filter.as_deref()).await?;
        let resources = records.into_iter().map(|r| to_discovery_resource(content_type, r)).collect();
        results.by_content_type.insert(content_type, resources);
    }
    Ok(results)
}
