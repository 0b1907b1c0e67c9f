//! HTTP API Handlers and Routes
//!
//! The REST surface of L.A.R.A, built on the Axum web framework. This is
//! the whole user-facing interface: upload files, ask questions, inspect
//! or destroy sessions.
//!
//! # API Endpoints
//!
//! - `POST /api/documents` - Upload files (multipart) and build a session index
//! - `POST /api/ask` - Ask a question against a session
//! - `GET /api/sessions/{id}` - Session details
//! - `DELETE /api/sessions/{id}` - Destroy a session
//! - `GET /api/health` - Health check
//! - `GET /api/openapi.json` - OpenAPI document
//!
//! # Errors
//!
//! Failures render as `{"error": message}` JSON with a matching status
//! code via `IntoResponse` on [`AppError`](crate::types::AppError).

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use crate::AppState;
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// OpenAPI document for the whole surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::documents::upload,
        handlers::ask::ask,
        handlers::session::session_info,
        handlers::session::destroy_session,
    ),
    components(schemas(
        crate::types::UploadResponse,
        crate::types::IngestedFile,
        crate::types::AskRequest,
        crate::types::AskResponse,
        crate::types::Source,
        crate::types::SessionInfo,
        crate::types::HealthResponse,
    )),
    tags(
        (name = "documents", description = "Document upload and indexing"),
        (name = "ask", description = "Grounded question answering"),
        (name = "sessions", description = "Session lifecycle"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Assemble the fully-layered application from its state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::create_router(state.config.server.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
