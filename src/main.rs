use std::sync::Arc;

use anyhow::Result;

use folio::appwrite::AppwriteClient;
use folio::cache::{CacheStore, ContentService};
use folio::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    folio::logging::init();

    let config = Config::from_env()?;
    let client = AppwriteClient::new(&config.endpoint, &config.project_id)?;
    let store = match &config.cache_path {
        Some(path) => CacheStore::open(path)?,
        None => CacheStore::open_default()?,
    };

    let content = Arc::new(ContentService::new(client.clone(), store, config.clone()));

    // Prime the published state before accepting requests: cached snapshot
    // if it is still fresh, remote fetch otherwise.
    content.load(false).await;

    folio::server::start_server(config, client, content).await
}
