//! Environment-driven configuration.
//!
//! Every knob has a default suited to a stock local Ollama install, so the
//! server starts with no configuration at all. A `.env` file is honored
//! via dotenvy.

use serde::Deserialize;
use std::env;

use crate::types::{AppError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub rag: RAGConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum size of an upload request body in bytes.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    /// Which chat provider to use: "ollama" (default) or "openai".
    pub provider: String,
    pub ollama_url: String,
    /// Chat model identity, e.g. "llama3.2".
    pub model: String,
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub openai_model: String,
}

impl LLMConfig {
    /// The model identity the active provider will run.
    pub fn active_model(&self) -> &str {
        if self.provider == "openai" {
            &self.openai_model
        } else {
            &self.model
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RAGConfig {
    /// Embedding model identity, e.g. "mxbai-embed-large".
    pub embedding_model: String,
    /// Number of passages retrieved per question.
    pub top_k: usize,
    /// Capacity of the embedding LRU cache (entries).
    pub embed_cache_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_var("PORT", 3000)?,
                max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", 50 * 1024 * 1024)?,
            },
            llm: LLMConfig {
                provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "ollama".to_string()),
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                model: env::var("LLM_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),
                openai_api_key: env::var("OPENAI_API_KEY").ok(),
                openai_api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                openai_model: env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            },
            rag: RAGConfig {
                embedding_model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "mxbai-embed-large".to_string()),
                top_k: parse_var("TOP_K", 5)?,
                embed_cache_size: parse_var("EMBED_CACHE_SIZE", 1024)?,
            },
        })
    }

    /// Validate cross-field constraints that `from_env` cannot catch.
    pub fn validate(&self) -> Result<()> {
        if self.rag.top_k == 0 {
            return Err(AppError::Configuration("TOP_K must be at least 1".into()));
        }
        match self.llm.provider.as_str() {
            "ollama" => Ok(()),
            "openai" => {
                if self.llm.openai_api_key.is_none() {
                    return Err(AppError::Configuration(
                        "LLM_PROVIDER=openai requires OPENAI_API_KEY".into(),
                    ));
                }
                Ok(())
            }
            other => Err(AppError::Configuration(format!(
                "Unknown LLM provider '{}'. Use 'ollama' or 'openai'",
                other
            ))),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| {
            AppError::Configuration(format!("{} has invalid value '{}'", name, value))
        }),
        Err(_) => Ok(default),
    }
}
