//! Source of the node type registry blob.

use anyhow::Context;
use async_trait::async_trait;
use common::node_type::NodeType;

#[async_trait]
pub trait NodeTypeSource: Send + Sync {
    async fn fetch_node_types(&self) -> anyhow::Result<Vec<NodeType>>;
}

/// Reads the registry JSON from blob storage on every call.
#[derive(Debug, Clone)]
pub struct BlobNodeTypeSource {
    client: reqwest::Client,
    url: String,
}

impl BlobNodeTypeSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), url: url.into() }
    }
}

#[async_trait]
impl NodeTypeSource for BlobNodeTypeSource {
    async fn fetch_node_types(&self) -> anyhow::Result<Vec<NodeType>> {
        let response = self.client.get(&self.url).send().await.context("Failed to fetch node type registry")?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("node type registry: {}: {}", status, response_txt);
        }
        parse_node_types(&response_txt)
    }
}

pub fn parse_node_types(json: &str) -> anyhow::Result<Vec<NodeType>> {
    serde_json::from_str(json).context("Malformed node type registry")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_registry_blob() {
        let node_types = parse_node_types(r#"[{"name": "News", "dateField": "PublishedDate"}, {"name": "Users"}]"#).unwrap();
        assert_eq!(node_types.len(), 2);
        assert_eq!(node_types[0].date_field.as_deref(), Some("PublishedDate"));
        assert_eq!(node_types[1].date_field, None);
    }

    #[test]
    fn rejects_malformed_blob() {
        let err = parse_node_types(r#"{"name": "News"}"#).unwrap_err();
        assert!(err.to_string().contains("Malformed node type registry"));
    }
}
