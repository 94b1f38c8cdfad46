//! Node type registry entries, as stored in the configuration blob.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeType {
    pub name: String,
    #[serde(default)]
    pub date_field: Option<String>,
}
