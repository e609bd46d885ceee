// Content API endpoints
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::cache::ContentItem;
use crate::server::ServerState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub available: bool,
    pub cached_projects: usize,
    pub cached_certificates: usize,
    pub last_fetched: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub projects: Vec<ContentItem>,
    pub certificates: Vec<ContentItem>,
    pub is_loading: bool,
    /// Epoch milliseconds of the persisted snapshot, if one exists.
    pub last_fetched: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub name: String,
    pub message: String,
    /// Project the comment belongs to; absent for site-wide comments.
    pub project_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
}

async fn content_response(state: &ServerState) -> ContentResponse {
    let last_fetched = state.content.snapshot_fetched_at().await;
    let content = state.content.state();

    ContentResponse {
        projects: content.projects,
        certificates: content.certificates,
        is_loading: content.is_loading,
        last_fetched,
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    let last_fetched = state.content.snapshot_fetched_at().await;
    let content = state.content.state();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        available: true,
        cached_projects: content.projects.len(),
        cached_certificates: content.certificates.len(),
        last_fetched,
    })
}

/// Full published content state
#[utoipa::path(
    get,
    path = "/api/content",
    responses(
        (status = 200, description = "Published projects and certificates", body = ContentResponse)
    ),
    tag = "content"
)]
pub async fn get_content(State(state): State<Arc<ServerState>>) -> Json<ContentResponse> {
    Json(content_response(&state).await)
}

/// Published projects
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Published projects", body = Vec<ContentItem>)
    ),
    tag = "content"
)]
pub async fn get_projects(State(state): State<Arc<ServerState>>) -> Json<Vec<ContentItem>> {
    Json(state.content.state().projects)
}

/// Published certificates
#[utoipa::path(
    get,
    path = "/api/certificates",
    responses(
        (status = 200, description = "Published certificates", body = Vec<ContentItem>)
    ),
    tag = "content"
)]
pub async fn get_certificates(State(state): State<Arc<ServerState>>) -> Json<Vec<ContentItem>> {
    Json(state.content.state().certificates)
}

/// Force a refresh cycle and return the refreshed state.
///
/// A remote failure is absorbed by the cache layer, so this always answers
/// 200 with the best data available.
#[utoipa::path(
    post,
    path = "/api/content/refresh",
    responses(
        (status = 200, description = "State after the refresh cycle", body = ContentResponse)
    ),
    tag = "content"
)]
pub async fn refresh_content(State(state): State<Arc<ServerState>>) -> Json<ContentResponse> {
    state.content.refresh().await;
    Json(content_response(&state).await)
}

/// Drop the persisted snapshot and refetch from the remote store
#[utoipa::path(
    post,
    path = "/api/cache/clear",
    responses(
        (status = 200, description = "State after the forced refetch", body = ContentResponse)
    ),
    tag = "content"
)]
pub async fn clear_cache(State(state): State<Arc<ServerState>>) -> Json<ContentResponse> {
    state.content.clear_and_refresh().await;
    Json(content_response(&state).await)
}

/// Store a visitor comment
#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment stored", body = CommentResponse),
        (status = 502, description = "Content store rejected the comment"),
        (status = 503, description = "Comments are not configured")
    ),
    tag = "comments"
)]
pub async fn submit_comment(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), StatusCode> {
    let collection_id = state
        .config
        .comment_collection_id
        .as_deref()
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let data = json!({
        "name": request.name,
        "message": request.message,
        "projectId": request.project_id,
    });

    match state
        .client
        .create_document(&state.config.database_id, collection_id, data)
        .await
    {
        Ok(document) => Ok((StatusCode::CREATED, Json(CommentResponse { id: document.id }))),
        Err(e) => {
            error!("Failed to store comment: {}", e);
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appwrite::AppwriteClient;
    use crate::cache::{CacheStore, ContentService};
    use crate::config::Config;
    use crate::server::create_router;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state(endpoint: &str) -> Arc<ServerState> {
        let config = Config {
            endpoint: endpoint.to_string(),
            project_id: "folio-test".to_string(),
            database_id: "db".to_string(),
            project_collection_id: "projects".to_string(),
            certificate_collection_id: "certs".to_string(),
            comment_collection_id: Some("comments".to_string()),
            bucket_id: "media".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            cache_path: None,
        };
        let client = AppwriteClient::new(&config.endpoint, &config.project_id).unwrap();
        let store = CacheStore::in_memory().unwrap();
        let content = Arc::new(ContentService::new(
            client.clone(),
            store,
            config.clone(),
        ));

        Arc::new(ServerState {
            config,
            client,
            content,
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_cached_counts() {
        let server = mockito::Server::new_async().await;
        let app = create_router(test_state(&server.url()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["cached_projects"], 0);
        assert_eq!(body["last_fetched"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn refresh_endpoint_returns_fetched_content() {
        let mut server = mockito::Server::new_async().await;
        let _projects = server
            .mock("GET", "/databases/db/collections/projects/documents")
            .with_status(200)
            .with_body(r#"{"total":1,"documents":[{"$id":"p1","Title":"Demo"}]}"#)
            .create_async()
            .await;
        let _certs = server
            .mock("GET", "/databases/db/collections/certs/documents")
            .with_status(200)
            .with_body(r#"{"total":0,"documents":[]}"#)
            .create_async()
            .await;

        let app = create_router(test_state(&server.url()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/content/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["projects"][0]["id"], "p1");
        assert_eq!(body["certificates"].as_array().unwrap().len(), 0);
        assert_eq!(body["isLoading"], false);
    }

    #[tokio::test]
    async fn comment_submission_writes_through() {
        let mut server = mockito::Server::new_async().await;
        let _comments = server
            .mock("POST", "/databases/db/collections/comments/documents")
            .with_status(201)
            .with_body(r#"{"$id":"cm1"}"#)
            .create_async()
            .await;

        let app = create_router(test_state(&server.url()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/comments")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"name":"Ada","message":"Nice work","projectId":"p1"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], "cm1");
    }
}
