//! Common library exports shared between the discovery tree API and its clients.

extern crate serde;


pub mod content_type;
pub mod discovery_query;
pub mod discovery_result;
pub mod node_type;
