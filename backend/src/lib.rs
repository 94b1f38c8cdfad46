//! Discovery tree search backend: facet filter composition, search index
//! access and the HTTP routes exposing them.

pub mod api;
pub mod config;
pub mod db_utils;
pub mod discovery;
pub mod server;
