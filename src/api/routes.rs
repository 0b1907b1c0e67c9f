use crate::AppState;
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use super::ApiDoc;
use utoipa::OpenApi;

/// Build the application router.
///
/// `max_upload_bytes` bounds the multipart upload body; everything else
/// uses axum defaults.
pub fn create_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/api/health", get(crate::api::handlers::health::health))
        .route("/api/openapi.json", get(openapi))
        .route(
            "/api/documents",
            post(crate::api::handlers::documents::upload),
        )
        .route("/api/ask", post(crate::api::handlers::ask::ask))
        .route(
            "/api/sessions/{id}",
            get(crate::api::handlers::session::session_info)
                .delete(crate::api::handlers::session::destroy_session),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Serve the generated OpenAPI document.
async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
