use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub search_service_url: String,
    pub search_api_key: Option<String>,
    pub search_api_version: String,
    pub search_index_prefix: String,
    pub search_top: u32,
    pub node_types_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // .env is optional outside development
        let _ = dotenv();

        Ok(Self {
            bind_addr: env::var("ATHENA_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            search_service_url: env::var("SEARCH_SERVICE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:7700".to_string()),
            search_api_key: env::var("SEARCH_API_KEY").ok().filter(|k| !k.is_empty()),
            search_api_version: env::var("SEARCH_API_VERSION").unwrap_or_else(|_| "2023-11-01".to_string()),
            search_index_prefix: env::var("SEARCH_INDEX_PREFIX").unwrap_or_default(),
            search_top: env::var("SEARCH_TOP")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .context("SEARCH_TOP must be a valid number")?,
            node_types_url: env::var("NODE_TYPES_URL").context("NODE_TYPES_URL must be set")?,
        })
    }
}
