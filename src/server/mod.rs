pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    serve, Router,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::appwrite::AppwriteClient;
use crate::cache::{ContentItem, ContentService};
use crate::config::Config;

pub struct ServerState {
    pub config: Config,
    pub client: AppwriteClient,
    pub content: Arc<ContentService>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health_check,
        routes::get_content,
        routes::get_projects,
        routes::get_certificates,
        routes::refresh_content,
        routes::clear_cache,
        routes::submit_comment,
    ),
    components(
        schemas(
            routes::HealthResponse,
            routes::ContentResponse,
            routes::CommentRequest,
            routes::CommentResponse,
            ContentItem,
        )
    ),
    tags(
        (name = "system", description = "Service health and status"),
        (name = "content", description = "Cached portfolio content"),
        (name = "comments", description = "Visitor comment submission")
    ),
    info(
        title = "Folio Content API",
        description = "REST API serving cached portfolio content",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn create_router(state: Arc<ServerState>) -> Router {
    // Create Swagger UI
    let swagger_ui = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        // System endpoints
        .route("/api/health", get(routes::health_check))
        // Content endpoints
        .route("/api/content", get(routes::get_content))
        .route("/api/projects", get(routes::get_projects))
        .route("/api/certificates", get(routes::get_certificates))
        .route("/api/content/refresh", post(routes::refresh_content))
        .route("/api/cache/clear", post(routes::clear_cache))
        // Comment submission
        .route("/api/comments", post(routes::submit_comment))
        // Merge swagger UI first
        .merge(swagger_ui)
        // Then add state and middleware
        .with_state(state)
        .layer(
            CorsLayer::new()
                // The site frontend is served from another origin
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}

pub async fn start_server(
    config: Config,
    client: AppwriteClient,
    content: Arc<ContentService>,
) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(ServerState {
        config,
        client,
        content,
    });

    let app = create_router(state);
    let listener = TcpListener::bind(&bind_addr).await?;

    info!("🚀 Content service listening on http://{}", bind_addr);
    info!("  📋 REST API: http://{}/api/content", bind_addr);
    info!("  📚 API documentation: http://{}/docs", bind_addr);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            signal_token.cancel();
        }
    });

    serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}
