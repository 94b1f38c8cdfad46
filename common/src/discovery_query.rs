//! Shared discovery tree query models.

use serde::{Deserialize, Serialize};

use crate::content_type::ContentType;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscoveryTreeQuery {
    pub search_texts: Vec<String>,
    pub search_keyword_ids: Vec<String>,
    pub selected_filters: Vec<SelectedFilter>,
}

impl DiscoveryTreeQuery {
    /// True when at least one non-blank free text or keyword id was supplied.
    pub fn has_search_terms(&self) -> bool {
        self.search_texts.iter().chain(self.search_keyword_ids.iter()).any(|s| !s.trim().is_empty())
    }
}

/// One facet group picked in the discovery tree, with the values chosen in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectedFilter {
    pub facet_type_id: u32,
    pub facet_values: Vec<FacetValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct FacetValue {
    /// Content type names this value filters; unknown names are ignored.
    pub content_types: Vec<String>,
    pub field_name: String,
    pub data_type: FieldDataType,
    pub field_values: Vec<FacetFieldValue>,
    pub facet_option_id: u32,
}

impl FacetValue {
    pub fn applies_to(&self, content_type: ContentType) -> bool {
        self.content_types.iter().any(|name| ContentType::from_name(name) == Some(content_type))
    }

    /// The "All" option: data type `NA` carrying `-1`.
    pub fn is_all_sentinel(&self) -> bool {
        self.data_type == FieldDataType::NotApplicable
            && self.field_values.first().is_some_and(|v| v.as_int() == Some(-1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum FieldDataType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "array")]
    Array,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "NA")]
    NotApplicable,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetFieldValue {
    Int(i64),
    String(String),
}

impl FacetFieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FacetFieldValue::Int(i) => Some(*i),
            FacetFieldValue::String(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for FacetFieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacetFieldValue::Int(i) => write!(f, "{i}"),
            FacetFieldValue::String(s) => f.write_str(s),
        }
    }
}
