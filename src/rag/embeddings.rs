//! Embedding providers.
//!
//! The [`EmbeddingProvider`] trait turns text into fixed-dimension
//! vectors. The production backend calls a local Ollama server; tests
//! substitute deterministic implementations.

use async_trait::async_trait;

use crate::types::Result;

/// A provider that generates vector embeddings from text input.
///
/// The default [`embed_batch`](EmbeddingProvider::embed_batch) calls
/// [`embed`](EmbeddingProvider::embed) sequentially; backends with native
/// batching should override it.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs, in order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// The embedding model identity.
    fn model_name(&self) -> &str;
}

#[cfg(feature = "ollama")]
pub use ollama::OllamaEmbedder;

#[cfg(feature = "ollama")]
mod ollama {
    use async_trait::async_trait;
    use ollama_rs::{
        Ollama,
        generation::embeddings::request::{EmbeddingsInput, GenerateEmbeddingsRequest},
    };
    use tracing::debug;

    use super::EmbeddingProvider;
    use crate::llm::ollama::split_base_url;
    use crate::rag::cache::EmbeddingCache;
    use crate::types::{AppError, Result};

    /// Embedding provider backed by a local Ollama server, fronted by an
    /// LRU cache so repeated text is embedded once per model.
    pub struct OllamaEmbedder {
        client: Ollama,
        model: String,
        cache: EmbeddingCache,
    }

    impl OllamaEmbedder {
        pub fn new(base_url: &str, model: String, cache_capacity: usize) -> Self {
            let (host, port) = split_base_url(base_url);
            Self {
                client: Ollama::new(host, port),
                model,
                cache: EmbeddingCache::new(cache_capacity),
            }
        }

        async fn request(&self, input: EmbeddingsInput, expected: usize) -> Result<Vec<Vec<f32>>> {
            let request = GenerateEmbeddingsRequest::new(self.model.clone(), input);
            let response = self
                .client
                .generate_embeddings(request)
                .await
                .map_err(|e| AppError::Embedding(format!("Ollama error: {}", e)))?;

            if response.embeddings.len() != expected {
                return Err(AppError::Embedding(format!(
                    "Ollama returned {} embeddings for {} inputs",
                    response.embeddings.len(),
                    expected
                )));
            }

            Ok(response.embeddings)
        }
    }

    #[async_trait]
    impl EmbeddingProvider for OllamaEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let key = EmbeddingCache::compute_key(text, &self.model);
            if let Some(cached) = self.cache.get(&key) {
                return Ok(cached);
            }

            let mut embeddings = self
                .request(EmbeddingsInput::Single(text.to_string()), 1)
                .await?;
            let embedding = embeddings.remove(0);

            self.cache.put(key, embedding.clone());
            Ok(embedding)
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            if texts.is_empty() {
                return Ok(Vec::new());
            }

            // Serve what we can from the cache, embed the rest in one call.
            let keys: Vec<String> = texts
                .iter()
                .map(|text| EmbeddingCache::compute_key(text, &self.model))
                .collect();
            let mut results: Vec<Option<Vec<f32>>> =
                keys.iter().map(|key| self.cache.get(key)).collect();

            let missing: Vec<usize> = (0..texts.len()).filter(|&i| results[i].is_none()).collect();

            if !missing.is_empty() {
                let inputs: Vec<String> = missing.iter().map(|&i| texts[i].clone()).collect();
                let fetched = self
                    .request(EmbeddingsInput::Multiple(inputs), missing.len())
                    .await?;

                for (&index, embedding) in missing.iter().zip(fetched) {
                    self.cache.put(keys[index].clone(), embedding.clone());
                    results[index] = Some(embedding);
                }
            }

            let stats = self.cache.stats();
            debug!(
                total = texts.len(),
                embedded = missing.len(),
                cache_hit_rate = stats.hit_rate(),
                "batch embedding complete"
            );

            // Every slot is filled: cached upfront or fetched just above.
            Ok(results.into_iter().flatten().collect())
        }

        fn model_name(&self) -> &str {
            &self.model
        }
    }
}
