//! Retrieval Augmented Generation (RAG) Pipeline
//!
//! Core pipeline components for answering questions from uploaded
//! documents only.
//!
//! # Module Structure
//!
//! - [`rag::embeddings`](crate::rag::embeddings) - Embedding provider trait and the Ollama backend
//! - [`rag::cache`](crate::rag::cache) - LRU cache for computed embeddings
//! - [`rag::prompt`](crate::rag::prompt) - The fixed grounding prompt and context formatting
//! - [`rag::pipeline`](crate::rag::pipeline) - Typed retrieve → format → generate stages
//!
//! # Pipeline Flow
//!
//! 1. **Ingestion** - Uploaded files are loaded into records and embedded
//! 2. **Storage** - Embeddings stored in the session's in-memory collection
//! 3. **Retrieval** - Question embedded, top-k similar records retrieved
//! 4. **Generation** - Chat model answers from the retrieved context only

pub mod cache;
pub mod embeddings;
pub mod pipeline;
pub mod prompt;
