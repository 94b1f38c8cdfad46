use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content_type::ContentType;

/// Search results grouped by content type. Types that were not queried are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DiscoveryTreeResults {
    pub by_content_type: BTreeMap<ContentType, Vec<DiscoveryResource>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResource {
    pub id: String,
    pub title: String,
    pub content_type: ContentType,
    /// Remaining fields of the index record, as returned by the search service.
    pub fields: BTreeMap<String, serde_json::Value>,
}
