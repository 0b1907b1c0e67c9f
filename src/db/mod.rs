//! Vector store abstraction and backends.
//!
//! The index behind every session is a vector store collection. The only
//! backend is an in-memory, cosine-similarity store: indexes are built
//! fresh per upload, never persisted, and destroyed with their session.

pub mod vectorstore;

pub use vectorstore::{InMemoryVectorStore, VectorStore};
