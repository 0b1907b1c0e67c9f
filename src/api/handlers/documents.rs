//! Document upload handler.

use crate::{
    AppState,
    types::{AppError, Result, UploadResponse},
};
use axum::{Json, extract::Multipart, extract::State};
use std::time::Instant;

/// Upload documents and build a fresh session index over them.
///
/// Accepts any number of file parts in one multipart request. Supported
/// extensions are .pdf, .txt, .md, and .csv; other files are skipped and
/// reported in the response. The whole batch fails if any supported file
/// is malformed.
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Documents ingested, session ready", body = UploadResponse),
        (status = 400, description = "Empty upload, malformed file, or no supported documents"),
        (status = 500, description = "Embedding or indexing failure")
    ),
    tag = "documents"
)]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let start = Instant::now();

    let mut uploads: Vec<(String, Vec<u8>)> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart request: {}", e)))?
    {
        // Only file parts carry documents; stray form fields are ignored.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await.map_err(|e| {
            AppError::InvalidInput(format!("Failed to read upload '{}': {}", file_name, e))
        })?;
        uploads.push((file_name, bytes.to_vec()));
    }

    if uploads.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one file is required".into(),
        ));
    }

    let file_count = uploads.len();
    let response = state.sessions.create(uploads).await?;

    tracing::info!(
        session = %response.session_id,
        files = file_count,
        documents = response.documents,
        skipped = response.skipped.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Documents ingested"
    );

    Ok(Json(response))
}
