//! Health check handler.

use crate::{AppState, types::HealthResponse};
use axum::{Json, extract::State};

/// Liveness probe reporting the configured model identities.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Server is up", body = HealthResponse)),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        llm_model: state.config.llm.active_model().to_string(),
        embedding_model: state.config.rag.embedding_model.clone(),
    })
}
