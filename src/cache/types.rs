use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::appwrite::Document;

/// A single portfolio entry - either a project or a certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Raw file reference as stored upstream. Kept alongside the resolved
    /// URL so a refresh always re-derives from the reference, never from a
    /// previously resolved URL.
    #[serde(default)]
    pub image_ref: Option<String>,
    /// Public view URL derived from `image_ref`; empty when there is none.
    #[serde(default)]
    pub image_url: String,
    /// Technology tags. Populated for projects, always empty for
    /// certificates.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ContentItem {
    /// Normalize a raw store document into a display item. `resolve` turns
    /// a file reference into a public view URL.
    pub fn from_document(
        doc: Document,
        with_tags: bool,
        resolve: impl Fn(&str) -> String,
    ) -> Self {
        let image_url = doc.img.as_deref().map(resolve).unwrap_or_default();

        Self {
            id: doc.id,
            title: doc.title,
            description: doc.description,
            link: doc.link,
            image_ref: doc.img,
            image_url,
            tags: if with_tags {
                doc.tech_stack.unwrap_or_default()
            } else {
                Vec::new()
            },
        }
    }
}

/// The persisted snapshot. Written and read as a single value so the two
/// collections can never be observed from different fetch generations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub projects: Vec<ContentItem>,
    pub certificates: Vec<ContentItem>,
    /// Epoch milliseconds at the time the snapshot was written.
    pub fetched_at: i64,
}

impl CacheEntry {
    /// Absolute TTL check - no renewal on read.
    pub fn is_fresh(&self, now_millis: i64, ttl: Duration) -> bool {
        now_millis - self.fetched_at < ttl.as_millis() as i64
    }
}

/// State published to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentState {
    pub projects: Vec<ContentItem>,
    pub certificates: Vec<ContentItem>,
    pub is_loading: bool,
}
