//! Decides, per content type, whether a search is issued and with which filter.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use common::{
    content_type::ContentType,
    discovery_query::{DiscoveryTreeQuery, FieldDataType},
};
use serde::Serialize;

use crate::discovery::{
    compose::{ComposedFilter, compose_content_type_filters},
    error::ComposeError,
    node_registry::NodeTypeRegistry,
    search_expression::{final_entity_filter_query, search_expression},
};

/// Content types to search, each with its filter (`None` searches unfiltered).
/// Types absent from the map are not searched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct DiscoveryPlan {
    pub queries: BTreeMap<ContentType, Option<String>>,
}

impl DiscoveryPlan {
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Whether composing `query` needs the node type registry.
pub fn requires_node_types(query: &DiscoveryTreeQuery) -> bool {
    query
        .selected_filters
        .iter()
        .flat_map(|f| f.facet_values.iter())
        .any(|v| v.data_type == FieldDataType::Date)
}

pub fn plan_discovery_query(
    query: &DiscoveryTreeQuery,
    registry: &NodeTypeRegistry,
    now: DateTime<Utc>,
) -> Result<DiscoveryPlan, ComposeError> {
    let filters = compose_content_type_filters(&query.selected_filters, registry, now)?;
    let search = search_expression(&query.search_texts, &query.search_keyword_ids);
    let unfiltered_search = query.has_search_terms() && query.selected_filters.is_empty();

    let queries = filters
        .into_iter()
        .filter(|(content_type, filter)| match filter {
            ComposedFilter::DateOnly => false,
            ComposedFilter::Expression(_) => true,
            ComposedFilter::All | ComposedFilter::Empty => {
                unfiltered_search || is_selected(query, *content_type)
            }
        })
        .map(|(content_type, filter)| (content_type, final_entity_filter_query(&filter, search.as_deref())))
        .collect();
    Ok(DiscoveryPlan { queries })
}

/// The content type's own facet group is among the selected filters.
fn is_selected(query: &DiscoveryTreeQuery, content_type: ContentType) -> bool {
    query
        .selected_filters
        .iter()
        .any(|f| ContentType::from_facet_group_id(f.facet_type_id) == Some(content_type))
}
