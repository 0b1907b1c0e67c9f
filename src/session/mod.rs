//! Session lifecycle.
//!
//! A session is the explicit context object behind one upload: the raw
//! files (held in a per-session temporary directory), the per-file
//! ingestion summary, and the vector store collection named after the
//! session id. Sessions are created by the upload action and destroyed
//! either explicitly or when the process exits; nothing is persisted.
//!
//! A session id either names a **Ready** session (index fully built) or
//! nothing at all: the session becomes visible only after every record
//! has been embedded and stored, and any ingest failure rolls back the
//! partial collection.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tempfile::TempDir;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::VectorStore;
use crate::loader::{self, SourceFile};
use crate::rag::embeddings::EmbeddingProvider;
use crate::types::{
    AppError, Document, IngestedFile, Result, SessionInfo, UploadResponse,
};

/// One upload's worth of state.
pub struct Session {
    pub id: Uuid,
    pub files: Vec<IngestedFile>,
    pub document_count: usize,
    pub created_at: DateTime<Utc>,
    /// Keeps the uploaded files on disk for the session's lifetime;
    /// dropping the session removes them.
    _uploads: TempDir,
}

/// Owns all live sessions and runs the ingest workflow.
pub struct SessionManager {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn VectorStore>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            store,
            embedder,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session from uploaded files: save → load → embed → store.
    ///
    /// All-or-nothing: if any supported file fails to load or any record
    /// fails to embed, no session is created and no index exists.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the upload yields no records at all
    ///   (only unsupported or empty files).
    /// - [`AppError::Loader`] / [`AppError::Embedding`] /
    ///   [`AppError::VectorStore`] from the failing stage.
    pub async fn create(&self, uploads: Vec<(String, Vec<u8>)>) -> Result<UploadResponse> {
        let session_id = Uuid::new_v4();

        let temp = TempDir::new()
            .map_err(|e| AppError::Internal(format!("Failed to create temp dir: {}", e)))?;

        let mut sources = Vec::with_capacity(uploads.len());
        for (name, bytes) in &uploads {
            let file_name = Path::new(name)
                .file_name()
                .ok_or_else(|| AppError::InvalidInput(format!("Invalid file name '{}'", name)))?;
            let path = temp.path().join(file_name);
            std::fs::write(&path, bytes)
                .map_err(|e| AppError::Internal(format!("Failed to save '{}': {}", name, e)))?;
            sources.push(SourceFile {
                name: name.clone(),
                path,
            });
        }

        let outcome = loader::load_files(&sources)?;
        if outcome.records.is_empty() {
            return Err(AppError::InvalidInput(
                "Upload produced no documents; supported types are .pdf, .txt, .md, .csv".into(),
            ));
        }

        let texts: Vec<String> = outcome
            .records
            .iter()
            .map(|record| record.content.clone())
            .collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let documents: Vec<Document> = outcome
            .records
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(index, (record, embedding))| Document {
                id: format!("{}_{}", session_id, index),
                content: record.content,
                metadata: record.metadata,
                embedding: Some(embedding),
            })
            .collect();

        let collection = session_id.to_string();
        let dimensions = documents[0]
            .embedding
            .as_ref()
            .map(Vec::len)
            .unwrap_or_default();
        self.store.create_collection(&collection, dimensions).await?;

        if let Err(e) = self.store.upsert(&collection, &documents).await {
            // Leave no half-built index behind the session id.
            if let Err(cleanup) = self.store.delete_collection(&collection).await {
                warn!(session = %session_id, error = %cleanup, "rollback failed");
            }
            return Err(e);
        }

        let document_count = documents.len();
        let response = UploadResponse {
            session_id,
            documents: document_count,
            files: outcome.files.clone(),
            skipped: outcome.skipped,
        };

        self.sessions.write().insert(
            session_id,
            Session {
                id: session_id,
                files: outcome.files,
                document_count,
                created_at: Utc::now(),
                _uploads: temp,
            },
        );

        info!(
            session = %session_id,
            documents = document_count,
            skipped = response.skipped.len(),
            "session ready"
        );

        Ok(response)
    }

    /// Resolve a session id to its collection name, or NotFound.
    pub fn collection_for(&self, id: Uuid) -> Result<String> {
        let sessions = self.sessions.read();
        if sessions.contains_key(&id) {
            Ok(id.to_string())
        } else {
            Err(AppError::NotFound(format!("Session '{}' not found", id)))
        }
    }

    pub fn info(&self, id: Uuid) -> Result<SessionInfo> {
        let sessions = self.sessions.read();
        let session = sessions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session '{}' not found", id)))?;

        Ok(SessionInfo {
            session_id: session.id,
            documents: session.document_count,
            files: session.files.clone(),
            created_at: session.created_at,
        })
    }

    /// Destroy a session: drop its collection and its uploaded files.
    pub async fn destroy(&self, id: Uuid) -> Result<()> {
        let session = self
            .sessions
            .write()
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session '{}' not found", id)))?;

        self.store.delete_collection(&id.to_string()).await?;
        drop(session); // removes the temp dir

        info!(session = %id, "session destroyed");
        Ok(())
    }
}
