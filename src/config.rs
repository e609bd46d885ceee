// Runtime configuration sourced from the environment.
//
// Identifiers are opaque strings handed through to the hosted backend
// unvalidated; a typo shows up as a fetch failure, not a startup failure.

use anyhow::{anyhow, Result};
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4650";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted backend, including the API version prefix
    /// (e.g. `https://cloud.appwrite.io/v1`).
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub project_collection_id: String,
    pub certificate_collection_id: String,
    /// Collection for visitor comments; comment submission is disabled when
    /// this is not configured.
    pub comment_collection_id: Option<String>,
    pub bucket_id: String,
    pub bind_addr: String,
    /// Override for the cache database location; defaults to a file under
    /// the home directory.
    pub cache_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint: require("APPWRITE_ENDPOINT")?,
            project_id: require("APPWRITE_PROJECT_ID")?,
            database_id: require("APPWRITE_DATABASE_ID")?,
            project_collection_id: require("APPWRITE_PROJECT_COLLECTION_ID")?,
            certificate_collection_id: require("APPWRITE_CERTIFICATE_COLLECTION_ID")?,
            comment_collection_id: std::env::var("APPWRITE_COMMENT_COLLECTION_ID").ok(),
            bucket_id: require("APPWRITE_BUCKET_ID")?,
            bind_addr: std::env::var("FOLIO_BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            cache_path: std::env::var("FOLIO_CACHE_PATH").ok().map(PathBuf::from),
        })
    }
}

fn require(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| anyhow!("Missing required environment variable: {}", key))
}
