// REST client for the hosted content backend - only the endpoints the
// portfolio needs: collection listings, document creation, and file view
// URL construction.
use super::types::{Document, DocumentList};
use anyhow::{anyhow, Result};
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AppwriteClient {
    client: Client,
    endpoint: String,
    project_id: String,
}

impl AppwriteClient {
    /// Create a new client for the given endpoint (base URL including the
    /// API version prefix) and project id.
    pub fn new(endpoint: impl Into<String>, project_id: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
        })
    }

    /// List every document in a collection.
    pub async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
    ) -> Result<Vec<Document>> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, database_id, collection_id
        );

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let list: DocumentList = response.json().await?;
                log::debug!(
                    "Received {} of {} documents from collection {}",
                    list.documents.len(),
                    list.total,
                    collection_id
                );
                Ok(list.documents)
            }
            StatusCode::UNAUTHORIZED => {
                Err(anyhow!("Content store: unauthorized - check project id"))
            }
            StatusCode::NOT_FOUND => {
                Err(anyhow!("Content store: database or collection not found"))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(anyhow!("Content store error ({}): {}", status, error_text))
            }
        }
    }

    /// Create a document with a server-assigned id.
    pub async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        data: serde_json::Value,
    ) -> Result<Document> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, database_id, collection_id
        );

        let payload = json!({
            "documentId": "unique()",
            "data": data,
        });

        let response = self
            .client
            .post(&url)
            .header("X-Appwrite-Project", &self.project_id)
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                let document: Document = response.json().await?;
                log::debug!(
                    "Created document {} in collection {}",
                    document.id,
                    collection_id
                );
                Ok(document)
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(anyhow!("Content store error ({}): {}", status, error_text))
            }
        }
    }

    /// Build the public view URL for a file in the storage bucket. Pure
    /// string construction, no network round-trip.
    pub fn file_view_url(&self, bucket_id: &str, file_id: &str) -> String {
        let raw = format!(
            "{}/storage/buckets/{}/files/{}/view",
            self.endpoint, bucket_id, file_id
        );

        match Url::parse(&raw) {
            Ok(mut url) => {
                url.query_pairs_mut().append_pair("project", &self.project_id);
                url.to_string()
            }
            Err(_) => format!("{}?project={}", raw, self.project_id),
        }
    }
}
