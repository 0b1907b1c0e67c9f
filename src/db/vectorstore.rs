//! Vector Store Abstraction Layer
//!
//! A unified interface for vector collections. Each session owns exactly
//! one collection; the store supports a single retrieval operation:
//! top-k nearest neighbors by cosine similarity, ranked descending.
//!
//! # Example
//!
//! ```rust,ignore
//! use lara::db::{InMemoryVectorStore, VectorStore};
//!
//! let store = InMemoryVectorStore::new();
//! store.create_collection("session-1", 1024).await?;
//! store.upsert("session-1", &documents).await?;
//! let results = store.search("session-1", &query_embedding, 5).await?;
//! ```

use crate::types::{AppError, Document, Result, SearchResult};
use async_trait::async_trait;

use parking_lot::RwLock;
use std::collections::HashMap;

// ============================================================================
// Vector Store Trait
// ============================================================================

/// Abstract trait for vector collection operations.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Get the name of this vector store backend.
    fn provider_name(&self) -> &'static str;

    /// Create a new collection with the specified vector dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection already exists.
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()>;

    /// Delete a collection and all its data.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection doesn't exist.
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// Check if a collection exists.
    async fn collection_exists(&self, name: &str) -> Result<bool>;

    /// Count documents in a collection.
    async fn count(&self, collection: &str) -> Result<usize>;

    /// Upsert documents with their embeddings into a collection.
    ///
    /// Documents are identified by their `id` field; an existing id is
    /// replaced. Every document must carry an embedding.
    async fn upsert(&self, collection: &str, documents: &[Document]) -> Result<usize>;

    /// Search for the `limit` most similar documents.
    ///
    /// # Returns
    ///
    /// Results sorted by similarity score, descending. Returned documents
    /// do not carry their embeddings.
    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>>;
}

// ============================================================================
// In-Memory Vector Store
// ============================================================================

/// In-memory vector store using cosine similarity.
///
/// Data is never persisted; collections live exactly as long as the
/// process (in practice, as long as their session).
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, Collection>>,
}

struct Collection {
    dimensions: usize,
    documents: HashMap<String, Document>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Calculate cosine similarity between two vectors.
    ///
    /// Returns 0.0 for mismatched lengths or zero-magnitude vectors.
    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn provider_name(&self) -> &'static str {
        "in-memory"
    }

    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()> {
        let mut collections = self.collections.write();
        if collections.contains_key(name) {
            return Err(AppError::InvalidInput(format!(
                "Collection '{}' already exists",
                name
            )));
        }
        collections.insert(
            name.to_string(),
            Collection {
                dimensions,
                documents: HashMap::new(),
            },
        );
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write();
        collections
            .remove(name)
            .ok_or_else(|| AppError::NotFound(format!("Collection '{}' not found", name)))?;
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> Result<bool> {
        let collections = self.collections.read();
        Ok(collections.contains_key(name))
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let collections = self.collections.read();
        let col = collections
            .get(collection)
            .ok_or_else(|| AppError::NotFound(format!("Collection '{}' not found", collection)))?;
        Ok(col.documents.len())
    }

    async fn upsert(&self, collection: &str, documents: &[Document]) -> Result<usize> {
        let mut collections = self.collections.write();
        let col = collections
            .get_mut(collection)
            .ok_or_else(|| AppError::NotFound(format!("Collection '{}' not found", collection)))?;

        let mut count = 0;
        for doc in documents {
            let Some(embedding) = doc.embedding.as_ref() else {
                return Err(AppError::InvalidInput(format!(
                    "Document '{}' is missing embedding",
                    doc.id
                )));
            };
            if embedding.len() != col.dimensions {
                return Err(AppError::InvalidInput(format!(
                    "Document '{}' embedding has {} dimensions, collection expects {}",
                    doc.id,
                    embedding.len(),
                    col.dimensions
                )));
            }
            col.documents.insert(doc.id.clone(), doc.clone());
            count += 1;
        }

        Ok(count)
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        let collections = self.collections.read();
        let col = collections
            .get(collection)
            .ok_or_else(|| AppError::NotFound(format!("Collection '{}' not found", collection)))?;

        let mut results: Vec<SearchResult> = col
            .documents
            .values()
            .filter_map(|doc| {
                let doc_embedding = doc.embedding.as_ref()?;
                let score = Self::cosine_similarity(embedding, doc_embedding);
                Some(SearchResult {
                    document: Document {
                        id: doc.id.clone(),
                        content: doc.content.clone(),
                        metadata: doc.metadata.clone(),
                        embedding: None, // Don't return embeddings in results
                    },
                    score,
                })
            })
            .collect();

        // Sort by score descending
        results
            .sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);

        Ok(results)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentMetadata;

    fn doc(id: &str, content: &str, embedding: Vec<f32>) -> Document {
        Document {
            id: id.to_string(),
            content: content.to_string(),
            metadata: DocumentMetadata::for_file("test.txt"),
            embedding: Some(embedding),
        }
    }

    #[tokio::test]
    async fn create_and_check_collection() {
        let store = InMemoryVectorStore::new();

        store.create_collection("s1", 3).await.unwrap();

        assert!(store.collection_exists("s1").await.unwrap());
        assert!(!store.collection_exists("s2").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_collection_is_an_error() {
        let store = InMemoryVectorStore::new();

        store.create_collection("s1", 3).await.unwrap();
        assert!(store.create_collection("s1", 3).await.is_err());
    }

    #[tokio::test]
    async fn nearest_vector_ranks_first() {
        let store = InMemoryVectorStore::new();
        store.create_collection("s1", 3).await.unwrap();

        let docs = vec![
            doc("d1", "Hello world", vec![1.0, 0.0, 0.0]),
            doc("d2", "Goodbye world", vec![0.0, 1.0, 0.0]),
            doc("d3", "Hello again", vec![0.9, 0.1, 0.0]),
        ];
        store.upsert("s1", &docs).await.unwrap();

        let results = store.search("s1", &[1.0, 0.0, 0.0], 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.id, "d1"); // Exact match first
        assert_eq!(results[1].document.id, "d3"); // Similar second
        assert!(results[0].score >= results[1].score);
        assert!(results[0].document.embedding.is_none());
    }

    #[tokio::test]
    async fn upsert_requires_embedding_and_matching_dimensions() {
        let store = InMemoryVectorStore::new();
        store.create_collection("s1", 3).await.unwrap();

        let mut missing = doc("d1", "no vector", vec![]);
        missing.embedding = None;
        assert!(store.upsert("s1", &[missing]).await.is_err());

        let wrong_dims = doc("d2", "short vector", vec![1.0, 0.0]);
        assert!(store.upsert("s1", &[wrong_dims]).await.is_err());

        assert_eq!(store.count("s1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn upsert_replaces_existing_ids() {
        let store = InMemoryVectorStore::new();
        store.create_collection("s1", 3).await.unwrap();

        store
            .upsert("s1", &[doc("d1", "old", vec![1.0, 0.0, 0.0])])
            .await
            .unwrap();
        store
            .upsert("s1", &[doc("d1", "new", vec![0.0, 1.0, 0.0])])
            .await
            .unwrap();

        assert_eq!(store.count("s1").await.unwrap(), 1);
        let results = store.search("s1", &[0.0, 1.0, 0.0], 1).await.unwrap();
        assert_eq!(results[0].document.content, "new");
    }

    #[tokio::test]
    async fn delete_collection_removes_data() {
        let store = InMemoryVectorStore::new();
        store.create_collection("s1", 3).await.unwrap();
        store
            .upsert("s1", &[doc("d1", "Test", vec![1.0, 0.0, 0.0])])
            .await
            .unwrap();

        store.delete_collection("s1").await.unwrap();

        assert!(!store.collection_exists("s1").await.unwrap());
        assert!(store.search("s1", &[1.0, 0.0, 0.0], 1).await.is_err());
    }

    #[tokio::test]
    async fn search_on_missing_collection_is_not_found() {
        let store = InMemoryVectorStore::new();
        let result = store.search("nope", &[1.0], 5).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn cosine_similarity_basics() {
        // Identical vectors
        assert!(
            (InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 0.001
        );

        // Orthogonal vectors
        assert!(InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 0.001);

        // Opposite vectors
        assert!(
            (InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 0.001
        );

        // Mismatched lengths and zero vectors degrade to 0.0
        assert_eq!(InMemoryVectorStore::cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(InMemoryVectorStore::cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
