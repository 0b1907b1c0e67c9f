//! Ollama integration tests with mocked network responses.
//!
//! These tests use wiremock to stand in for the Ollama API server and
//! validate the chat client, the embedder, and the embedding cache at
//! the wire level.

#![cfg(feature = "ollama")]

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lara::llm::LLMClient;
use lara::llm::ollama::OllamaClient;
use lara::rag::embeddings::{EmbeddingProvider, OllamaEmbedder};
use lara::types::AppError;

// ============= Helper Functions =============

/// A mock Ollama chat completion response.
fn mock_chat_response(content: &str) -> serde_json::Value {
    json!({
        "model": "llama3.2",
        "created_at": "2024-01-01T00:00:00Z",
        "message": {
            "role": "assistant",
            "content": content
        },
        "done": true
    })
}

/// A mock Ollama embeddings response.
fn mock_embeddings_response(embeddings: Vec<Vec<f32>>) -> serde_json::Value {
    json!({
        "model": "mxbai-embed-large",
        "embeddings": embeddings
    })
}

// ============= Chat Client =============

#[tokio::test]
async fn chat_client_returns_message_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mock_chat_response("Hello! How can I help you?")),
        )
        .mount(&mock_server)
        .await;

    let client = OllamaClient::new(mock_server.uri(), "llama3.2".to_string());
    let response = client.generate("Hello").await.unwrap();

    assert_eq!(response, "Hello! How can I help you?");
    assert_eq!(client.model_name(), "llama3.2");
}

#[tokio::test]
async fn chat_client_sends_system_prompt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mock_chat_response("I answer only from context.")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OllamaClient::new(mock_server.uri(), "llama3.2".to_string());
    let response = client
        .generate_with_system("Answer only from the given context", "Who are you?")
        .await
        .unwrap();

    assert_eq!(response, "I answer only from context.");
}

#[tokio::test]
async fn chat_client_surfaces_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = OllamaClient::new(mock_server.uri(), "llama3.2".to_string());
    let result = client.generate("Hello").await;

    assert!(matches!(result, Err(AppError::LLM(_))));
}

// ============= Embedder =============

#[tokio::test]
async fn embedder_parses_single_embedding() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mock_embeddings_response(vec![vec![0.1, 0.2, 0.3]])),
        )
        .mount(&mock_server)
        .await;

    let embedder = OllamaEmbedder::new(&mock_server.uri(), "mxbai-embed-large".to_string(), 16);
    let embedding = embedder.embed("The sky is blue.").await.unwrap();

    assert_eq!(embedding, vec![0.1, 0.2, 0.3]);
    assert_eq!(embedder.model_name(), "mxbai-embed-large");
}

#[tokio::test]
async fn embedder_caches_repeated_text() {
    let mock_server = MockServer::start().await;

    // The cache must keep the second embed off the network entirely.
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mock_embeddings_response(vec![vec![1.0, 0.0]])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let embedder = OllamaEmbedder::new(&mock_server.uri(), "mxbai-embed-large".to_string(), 16);

    let first = embedder.embed("The sky is blue.").await.unwrap();
    let second = embedder.embed("The sky is blue.").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn embedder_batches_in_one_request_preserving_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_embeddings_response(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let embedder = OllamaEmbedder::new(&mock_server.uri(), "mxbai-embed-large".to_string(), 16);
    let embeddings = embedder
        .embed_batch(&["first".to_string(), "second".to_string()])
        .await
        .unwrap();

    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[0], vec![1.0, 0.0]);
    assert_eq!(embeddings[1], vec![0.0, 1.0]);
}

#[tokio::test]
async fn embedder_rejects_count_mismatch() {
    let mock_server = MockServer::start().await;

    // One embedding for two inputs is a broken response.
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mock_embeddings_response(vec![vec![1.0, 0.0]])),
        )
        .mount(&mock_server)
        .await;

    let embedder = OllamaEmbedder::new(&mock_server.uri(), "mxbai-embed-large".to_string(), 16);
    let result = embedder
        .embed_batch(&["first".to_string(), "second".to_string()])
        .await;

    assert!(matches!(result, Err(AppError::Embedding(_))));
}

#[tokio::test]
async fn embedder_surfaces_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let embedder = OllamaEmbedder::new(&mock_server.uri(), "mxbai-embed-large".to_string(), 16);
    let result = embedder.embed("text").await;

    assert!(matches!(result, Err(AppError::Embedding(_))));
}
