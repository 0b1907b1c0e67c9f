//! Question answering handler.

use crate::{
    AppState,
    rag::pipeline::AnswerPipeline,
    types::{AppError, AskRequest, AskResponse, Result, Source},
};
use axum::{Json, extract::State};
use std::time::Instant;

/// Answer a question from a session's documents only.
///
/// Stateless: every question embeds, retrieves, and generates from
/// scratch against the session's index.
#[utoipa::path(
    post,
    path = "/api/ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Grounded answer", body = AskResponse),
        (status = 400, description = "Empty question or invalid top_k"),
        (status = 404, description = "Unknown session"),
        (status = 500, description = "Embedding or model failure")
    ),
    tag = "ask"
)]
pub async fn ask(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let start = Instant::now();

    if payload.question.trim().is_empty() {
        return Err(AppError::InvalidInput("Question required".into()));
    }
    let top_k = payload.top_k.unwrap_or(state.config.rag.top_k);
    if top_k == 0 {
        return Err(AppError::InvalidInput("top_k must be at least 1".into()));
    }

    let collection = state.sessions.collection_for(payload.session_id)?;

    let llm = state.llm_factory.create_default().await?;
    let pipeline = AnswerPipeline::new(
        state.embedder.clone(),
        state.store.clone(),
        llm,
        top_k,
    );

    let grounded = pipeline.answer(&collection, &payload.question).await?;

    let sources: Vec<Source> = grounded
        .sources
        .iter()
        .map(|result| Source {
            source: result.document.metadata.source.clone(),
            row: result.document.metadata.row,
            page: result.document.metadata.page,
            score: result.score,
            content: result.document.content.clone(),
        })
        .collect();

    tracing::info!(
        session = %payload.session_id,
        retrieved = sources.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Question answered"
    );

    Ok(Json(AskResponse {
        answer: grounded.answer,
        model: grounded.model,
        sources,
    }))
}
