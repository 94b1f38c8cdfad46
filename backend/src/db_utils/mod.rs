pub mod node_types;
pub mod search_index;
