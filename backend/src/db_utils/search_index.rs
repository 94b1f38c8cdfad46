//! Client for the managed search index holding one index per content type.

use std::collections::BTreeMap;

use anyhow::Context;
use async_trait::async_trait;
use common::{content_type::ContentType, discovery_result::DiscoveryResource};
use serde::{Deserialize, Serialize};

use crate::config::Config;

pub type RawSearchRecord = BTreeMap<String, serde_json::Value>;

#[async_trait]
pub trait ResourceSearch: Send + Sync {
    /// Records of `content_type` matching `filter`; `None` returns unfiltered records.
    async fn search(&self, content_type: ContentType, filter: Option<&str>) -> anyhow::Result<Vec<RawSearchRecord>>;
}

#[derive(Debug, Serialize)]
struct SearchIndexRequest<'a> {
    search: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
    top: u32,
}

#[derive(Debug, Deserialize)]
struct RawSearchIndexResponse {
    value: Vec<RawSearchRecord>,
}

#[derive(Debug, Clone)]
pub struct SearchIndexClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    api_version: String,
    index_prefix: String,
    top: u32,
}

impl SearchIndexClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.search_service_url.trim_end_matches('/').to_string(),
            api_key: config.search_api_key.clone(),
            api_version: config.search_api_version.clone(),
            index_prefix: config.search_index_prefix.clone(),
            top: config.search_top,
        }
    }

    fn search_url(&self, content_type: ContentType) -> String {
        format!(
            "{}/indexes/{}{}/docs/search?api-version={}",
            self.base_url,
            self.index_prefix,
            content_type.index_name(),
            self.api_version
        )
    }
}

#[async_trait]
impl ResourceSearch for SearchIndexClient {
    async fn search(&self, content_type: ContentType, filter: Option<&str>) -> anyhow::Result<Vec<RawSearchRecord>> {
        let t0 = std::time::Instant::now();
        let body = SearchIndexRequest { search: "*", filter, top: self.top };
        let mut request = self.client.post(self.search_url(content_type)).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("api-key", api_key);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("search request for {content_type} failed"))?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("search for {}: {}: {}", content_type, status, response_txt);
        }
        let response: RawSearchIndexResponse = serde_json::from_str(&response_txt)
            .with_context(|| format!("malformed search response for {content_type}"))?;
        tracing::debug!(
            "search {}: {} records in {}ms",
            content_type,
            response.value.len(),
            t0.elapsed().as_millis()
        );
        Ok(response.value)
    }
}

const ID_KEYS: [&str; 3] = ["id", "Id", "RowKey"];
const TITLE_KEYS: [&str; 4] = ["title", "Title", "name", "Name"];

fn take_string(record: &mut RawSearchRecord, keys: &[&str]) -> Option<String> {
    for key in keys {
        match record.remove(*key) {
            Some(serde_json::Value::String(s)) => return Some(s),
            Some(serde_json::Value::Number(n)) => return Some(n.to_string()),
            Some(other) => {
                record.insert(key.to_string(), other);
            }
            None => {}
        }
    }
    None
}

/// Lifts id and title out of an index record, keeping the rest as-is.
pub fn to_discovery_resource(content_type: ContentType, mut record: RawSearchRecord) -> DiscoveryResource {
    let id = take_string(&mut record, &ID_KEYS).unwrap_or_default();
    let title = take_string(&mut record, &TITLE_KEYS).unwrap_or_default();
    DiscoveryResource { id, title, content_type, fields: record }
}
