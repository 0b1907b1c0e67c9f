//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod mocks;

use std::sync::Arc;

use axum_test::TestServer;
use lara::{
    AppState, Config, InMemoryVectorStore, api,
    utils::config::{LLMConfig, RAGConfig, ServerConfig},
};

use mocks::{MockEmbedder, MockLLMClient, MockLLMFactory};

/// A fixed configuration so tests never depend on the environment.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_upload_bytes: 10 * 1024 * 1024,
        },
        llm: LLMConfig {
            provider: "ollama".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            openai_api_key: None,
            openai_api_base: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
        },
        rag: RAGConfig {
            embedding_model: "mxbai-embed-large".to_string(),
            top_k: 5,
            embed_cache_size: 64,
        },
    }
}

/// App state wired with the in-memory store, the deterministic mock
/// embedder, and a mock LLM.
pub fn test_state(llm: MockLLMClient) -> AppState {
    AppState::new(
        Arc::new(test_config()),
        Arc::new(InMemoryVectorStore::new()),
        Arc::new(MockEmbedder::new()),
        Arc::new(MockLLMFactory::new(llm)),
    )
}

/// Test server over the full router.
pub fn test_server(llm: MockLLMClient) -> TestServer {
    TestServer::new(api::router(test_state(llm))).expect("failed to start test server")
}
