//! Discovery tree filter composition: selected facets and search terms in,
//! one search-index filter per content type out.

pub mod compose;
pub mod error;
pub mod filter_expression;
pub mod node_registry;
pub mod plan;
pub mod search_expression;

pub use compose::{ComposedFilter, compose_content_type_filters};
pub use error::ComposeError;
pub use node_registry::NodeTypeRegistry;
pub use plan::{DiscoveryPlan, plan_discovery_query};
