//! Lookup of per-content-type date fields from the node type registry.

use std::collections::BTreeMap;

use common::{content_type::ContentType, node_type::NodeType};
use tracing::warn;

use crate::discovery::error::ComposeError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTypeRegistry {
    date_fields: BTreeMap<ContentType, Option<String>>,
}

impl NodeTypeRegistry {
    pub fn from_node_types(node_types: Vec<NodeType>) -> Self {
        let mut date_fields = BTreeMap::new();
        for node_type in node_types {
            match ContentType::from_name(&node_type.name) {
                Some(content_type) => {
                    let date_field = node_type.date_field.filter(|f| !f.trim().is_empty());
                    date_fields.insert(content_type, date_field);
                }
                None => warn!("node type registry: ignoring unknown node type {:?}", node_type.name),
            }
        }
        Self { date_fields }
    }

    /// Date field of `content_type`; `Ok(None)` when the type is registered without one.
    pub fn date_field(&self, content_type: ContentType) -> Result<Option<&str>, ComposeError> {
        match self.date_fields.get(&content_type) {
            Some(field) => Ok(field.as_deref()),
            None => Err(ComposeError::MissingNodeType { content_type }),
        }
    }
}
