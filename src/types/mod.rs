use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ============= API Request/Response Types =============

/// Response returned after a successful document upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Identifier of the session that now owns the uploaded documents.
    pub session_id: Uuid,
    /// Total number of document records indexed across all files.
    pub documents: usize,
    /// Per-file ingestion summary, in upload order.
    pub files: Vec<IngestedFile>,
    /// Files that were skipped because their extension is not supported.
    pub skipped: Vec<String>,
}

/// Summary of a single ingested file.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngestedFile {
    /// Original file name as uploaded.
    pub name: String,
    /// Loader kind that handled the file ("text", "csv", "pdf").
    pub kind: String,
    /// Number of document records produced from this file.
    pub records: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AskRequest {
    /// Session to answer against.
    pub session_id: Uuid,
    /// Free-text question.
    pub question: String,
    /// Override for the number of passages to retrieve (default from config).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AskResponse {
    /// Model answer, grounded in the retrieved context.
    pub answer: String,
    /// Identity of the chat model that produced the answer.
    pub model: String,
    /// Retrieved passages the answer was grounded in, ranked by similarity.
    pub sources: Vec<Source>,
}

/// A retrieved passage as surfaced to the client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Source {
    /// Name of the file the passage came from.
    pub source: String,
    /// CSV row index, if the passage is a CSV row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// PDF page number, if the passage is a PDF page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    /// Cosine similarity against the question embedding.
    pub score: f32,
    /// Full text of the passage.
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionInfo {
    pub session_id: Uuid,
    /// Number of document records in the session index.
    pub documents: usize,
    pub files: Vec<IngestedFile>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Configured chat model identity.
    pub llm_model: String,
    /// Configured embedding model identity.
    pub embedding_model: String,
}

// ============= RAG Types =============

/// A single retrievable unit of text: a whole text file, a CSV row, or a
/// PDF page. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub metadata: DocumentMetadata,
    pub embedding: Option<Vec<f32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Name of the source file the record was loaded from.
    pub source: String,
    /// 0-based row index for CSV records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// 1-based page number for PDF records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
}

impl DocumentMetadata {
    /// Metadata for a whole-file text record.
    pub fn for_file(source: &str) -> Self {
        Self {
            source: source.to_string(),
            row: None,
            page: None,
        }
    }

    /// Metadata for a CSV row record.
    pub fn for_row(source: &str, row: usize) -> Self {
        Self {
            source: source.to_string(),
            row: Some(row),
            page: None,
        }
    }

    /// Metadata for a PDF page record.
    pub fn for_page(source: &str, page: usize) -> Self {
        Self {
            source: source.to_string(),
            row: None,
            page: Some(page),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub document: Document,
    pub score: f32,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Loader error: {0}")]
    Loader(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = match &self {
            AppError::Loader(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Embedding(_)
            | AppError::LLM(_)
            | AppError::VectorStore(_)
            | AppError::Configuration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_constructors_set_exactly_one_position_field() {
        let file = DocumentMetadata::for_file("notes.txt");
        assert_eq!(file.source, "notes.txt");
        assert!(file.row.is_none() && file.page.is_none());

        let row = DocumentMetadata::for_row("people.csv", 3);
        assert_eq!(row.row, Some(3));
        assert!(row.page.is_none());

        let page = DocumentMetadata::for_page("report.pdf", 2);
        assert_eq!(page.page, Some(2));
        assert!(page.row.is_none());
    }

    #[test]
    fn error_messages_carry_context() {
        let err = AppError::NotFound("session 'abc' not found".to_string());
        assert_eq!(err.to_string(), "Not found: session 'abc' not found");
    }
}
