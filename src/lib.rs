//! # L.A.R.A - Local Augmented Retrieval Assistant
//!
//! A local-first RAG document assistant: upload PDF, TXT, MD, or CSV
//! files, then ask questions answered **only** from those documents.
//! Embeddings and chat completions come from a locally hosted Ollama
//! server; the similarity index lives in memory and dies with the
//! session.
//!
//! ## Overview
//!
//! L.A.R.A can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `lara-server` binary
//! 2. **As a library** - Import the pipeline components into your own project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use lara::{AppState, Config, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = AppState::from_config(Config::from_env()?)?;
//!     let app = api::router(state);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! Upload: files → [`loader`] records → [`rag::embeddings`] vectors →
//! [`db`] collection (session Ready).
//! Question: embed → top-k search → [`rag::prompt`] → chat model →
//! answer, via [`rag::pipeline`].
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ollama` | Ollama chat + embeddings (default) |
//! | `openai` | OpenAI-compatible chat endpoints |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`cli`] - Command-line interface
//! - [`db`] - Vector store abstraction and the in-memory backend
//! - [`loader`] - File-type dispatch and record extraction
//! - [`llm`] - Chat model client implementations
//! - [`rag`] - Embeddings, prompt, and the answer pipeline
//! - [`session`] - Session-scoped context and lifecycle
//! - [`types`] - Common types and error handling

/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface parsing and output helpers.
pub mod cli;
/// Vector store abstraction and backends.
pub mod db;
/// LLM provider clients and abstractions.
pub mod llm;
/// Document loading (text, CSV, PDF).
pub mod loader;
/// Retrieval Augmented Generation components.
pub mod rag;
/// Session-scoped context objects and lifecycle.
pub mod session;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use db::{InMemoryVectorStore, VectorStore};
pub use llm::{LLMClient, LLMClientFactory, LLMClientFactoryTrait, Provider};
pub use rag::embeddings::EmbeddingProvider;
pub use session::SessionManager;
pub use types::{AppError, Result};
pub use utils::config::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration
    pub config: Arc<Config>,
    /// Vector store holding every session's collection
    pub store: Arc<dyn VectorStore>,
    /// Embedding provider
    pub embedder: Arc<dyn EmbeddingProvider>,
    /// Chat client factory
    pub llm_factory: Arc<dyn LLMClientFactoryTrait>,
    /// Session registry and ingest workflow
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    /// Wire the state from explicit components. Tests inject mock
    /// embedders and LLM factories here.
    pub fn new(
        config: Arc<Config>,
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        llm_factory: Arc<dyn LLMClientFactoryTrait>,
    ) -> Self {
        let sessions = Arc::new(SessionManager::new(store.clone(), embedder.clone()));
        Self {
            config,
            store,
            embedder,
            llm_factory,
            sessions,
        }
    }

    /// Build production components from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if the configuration is invalid.
    #[cfg(feature = "ollama")]
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;

        let provider = Provider::from_config(&config)?;
        let store: Arc<dyn VectorStore> = Arc::new(InMemoryVectorStore::new());
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(rag::embeddings::OllamaEmbedder::new(
            &config.llm.ollama_url,
            config.rag.embedding_model.clone(),
            config.rag.embed_cache_size,
        ));
        let llm_factory: Arc<dyn LLMClientFactoryTrait> =
            Arc::new(LLMClientFactory::new(provider));

        Ok(Self::new(Arc::new(config), store, embedder, llm_factory))
    }
}
