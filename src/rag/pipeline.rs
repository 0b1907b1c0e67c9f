//! Answer pipeline.
//!
//! [`AnswerPipeline`] composes the question-answering stages explicitly:
//! embed the question, search the session's collection, format the
//! context block, render the grounding prompt, and generate. Each stage
//! has a typed input and output so failures are attributable to a stage.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::db::VectorStore;
use crate::llm::LLMClient;
use crate::rag::embeddings::EmbeddingProvider;
use crate::rag::prompt;
use crate::types::{Result, SearchResult};

/// A generated answer together with the passages it was grounded in.
#[derive(Debug)]
pub struct GroundedAnswer {
    pub answer: String,
    /// Identity of the model that generated the answer.
    pub model: String,
    /// Retrieved passages in ranked order.
    pub sources: Vec<SearchResult>,
}

/// The question-answering pipeline over one session collection.
///
/// Stateless across questions: every call embeds, retrieves, and
/// generates from scratch against the Ready session index.
pub struct AnswerPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    llm: Box<dyn LLMClient>,
    top_k: usize,
}

impl AnswerPipeline {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        llm: Box<dyn LLMClient>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            llm,
            top_k,
        }
    }

    /// Retrieve the top-k most similar passages for a question.
    pub async fn retrieve(&self, collection: &str, question: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(question).await?;
        self.store
            .search(collection, &query_embedding, self.top_k)
            .await
    }

    /// Answer a question from the collection's documents only.
    pub async fn answer(&self, collection: &str, question: &str) -> Result<GroundedAnswer> {
        let start = Instant::now();

        let sources = self.retrieve(collection, question).await?;
        let context = prompt::format_context(&sources);
        let rendered = prompt::build_prompt(&context, question);
        let answer = self.llm.generate(&rendered).await?;

        info!(
            collection,
            retrieved = sources.len(),
            model = self.llm.model_name(),
            duration_ms = start.elapsed().as_millis() as u64,
            "question answered"
        );

        Ok(GroundedAnswer {
            answer,
            model: self.llm.model_name().to_string(),
            sources,
        })
    }
}
