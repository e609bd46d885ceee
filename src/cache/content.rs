// Cache-aside content service - the data layer behind the portfolio UI.
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::{watch, Mutex};

use super::store::CacheStore;
use super::types::{CacheEntry, ContentItem, ContentState};
use crate::appwrite::AppwriteClient;
use crate::config::Config;

/// Key the snapshot is persisted under in the cache store.
pub const SNAPSHOT_KEY: &str = "content_snapshot";

/// Cached content is considered fresh for five minutes, measured from the
/// time the snapshot was written.
pub const CACHE_EXPIRATION: Duration = Duration::from_secs(5 * 60);

/// Cache-aside access layer for projects and certificates.
///
/// Consumers subscribe to the published [`ContentState`]; `load` keeps the
/// persistent snapshot and the published state in lockstep. Remote failures
/// never escape - the last known snapshot (or empty content) is served
/// instead, so subscribers only ever observe `is_loading` transitions and
/// possibly stale data.
pub struct ContentService {
    client: AppwriteClient,
    store: CacheStore,
    config: Config,
    state_tx: watch::Sender<ContentState>,
    /// Serializes load cycles so two concurrent triggers cannot race on the
    /// persisted snapshot.
    load_lock: Mutex<()>,
}

impl ContentService {
    pub fn new(client: AppwriteClient, store: CacheStore, config: Config) -> Self {
        let (state_tx, _) = watch::channel(ContentState {
            is_loading: true,
            ..ContentState::default()
        });

        Self {
            client,
            store,
            config,
            state_tx,
            load_lock: Mutex::new(()),
        }
    }

    /// Current published state.
    pub fn state(&self) -> ContentState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to state updates.
    pub fn subscribe(&self) -> watch::Receiver<ContentState> {
        self.state_tx.subscribe()
    }

    /// Timestamp (epoch millis) of the persisted snapshot, if any.
    pub async fn snapshot_fetched_at(&self) -> Option<i64> {
        self.read_snapshot().await.map(|entry| entry.fetched_at)
    }

    /// Run one fetch-and-cache cycle.
    ///
    /// Never fails: every error is absorbed into the stale-or-empty
    /// fallback. With a fresh snapshot and no `force_refresh`, the cached
    /// data is published without any remote call.
    pub async fn load(&self, force_refresh: bool) {
        let _cycle = self.load_lock.lock().await;
        self.set_loading(true);

        let snapshot = self.read_snapshot().await;
        let now = Utc::now().timestamp_millis();

        if let Some(entry) = &snapshot {
            if !force_refresh && entry.is_fresh(now, CACHE_EXPIRATION) {
                log::debug!(
                    "Content cache hit ({}ms old), skipping remote fetch",
                    now - entry.fetched_at
                );
                self.publish(entry.projects.clone(), entry.certificates.clone(), false);
                return;
            }

            // Expired or forced: keep the previous content visible while the
            // fetch is in flight, so subscribers never see an empty flash.
            self.publish(entry.projects.clone(), entry.certificates.clone(), true);
        }

        match self.fetch_and_persist().await {
            Ok(entry) => {
                log::info!(
                    "✅ Content refreshed: {} projects, {} certificates",
                    entry.projects.len(),
                    entry.certificates.len()
                );
                self.publish(entry.projects, entry.certificates, false);
            }
            Err(e) => {
                log::error!("❌ Content fetch failed, serving cached data: {}", e);
                match self.read_snapshot().await {
                    Some(entry) => self.publish(entry.projects, entry.certificates, false),
                    None => self.publish(Vec::new(), Vec::new(), false),
                }
            }
        }
    }

    /// Equivalent to `load(true)`.
    pub async fn refresh(&self) {
        self.load(true).await;
    }

    /// Drop the persisted snapshot, then force a refresh.
    pub async fn clear_and_refresh(&self) {
        if let Err(e) = self.store.remove(SNAPSHOT_KEY).await {
            log::warn!("Failed to clear content snapshot: {}", e);
        }
        self.load(true).await;
    }

    /// Issue both collection queries together, normalize the results, and
    /// persist the new snapshot. The query pair is all-or-nothing: one
    /// rejection fails the whole cycle.
    async fn fetch_and_persist(&self) -> Result<CacheEntry> {
        let Config {
            database_id,
            project_collection_id,
            certificate_collection_id,
            bucket_id,
            ..
        } = &self.config;

        let (projects, certificates) = tokio::join!(
            self.client.list_documents(database_id, project_collection_id),
            self.client.list_documents(database_id, certificate_collection_id),
        );
        let (projects, certificates) = match (projects, certificates) {
            (Ok(projects), Ok(certificates)) => (projects, certificates),
            (Err(e), _) | (_, Err(e)) => return Err(e),
        };

        // Resolution is pure URL construction from the raw file reference.
        let resolve = |file_id: &str| self.client.file_view_url(bucket_id, file_id);
        let projects = projects
            .into_iter()
            .map(|doc| ContentItem::from_document(doc, true, &resolve))
            .collect();
        let certificates = certificates
            .into_iter()
            .map(|doc| ContentItem::from_document(doc, false, &resolve))
            .collect();

        let entry = CacheEntry {
            projects,
            certificates,
            fetched_at: Utc::now().timestamp_millis(),
        };
        self.store
            .set(SNAPSHOT_KEY, &serde_json::to_string(&entry)?)
            .await?;

        Ok(entry)
    }

    async fn read_snapshot(&self) -> Option<CacheEntry> {
        let raw = match self.store.get(SNAPSHOT_KEY).await {
            Ok(value) => value?,
            Err(e) => {
                log::warn!("Failed to read content snapshot: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Discarding unreadable content snapshot: {}", e);
                None
            }
        }
    }

    fn set_loading(&self, is_loading: bool) {
        self.state_tx.send_modify(|state| state.is_loading = is_loading);
    }

    /// Single atomic publish: both collections and the loading flag change
    /// in one state transition.
    fn publish(
        &self,
        projects: Vec<ContentItem>,
        certificates: Vec<ContentItem>,
        is_loading: bool,
    ) {
        self.state_tx.send_replace(ContentState {
            projects,
            certificates,
            is_loading,
        });
    }
}
