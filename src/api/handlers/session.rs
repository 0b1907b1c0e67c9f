//! Session inspection and teardown handlers.

use crate::{
    AppState,
    types::{Result, SessionInfo},
};
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// Describe a session: files, record count, age.
#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    params(("id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Session details", body = SessionInfo),
        (status = 404, description = "Unknown session")
    ),
    tag = "sessions"
)]
pub async fn session_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionInfo>> {
    Ok(Json(state.sessions.info(id)?))
}

/// Destroy a session, its index, and its temporary files.
#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    params(("id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Session destroyed"),
        (status = 404, description = "Unknown session")
    ),
    tag = "sessions"
)]
pub async fn destroy_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state.sessions.destroy(id).await?;
    Ok(Json(serde_json::json!({ "destroyed": id })))
}
