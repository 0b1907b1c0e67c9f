//! LLM client abstractions and provider management.

use crate::types::{AppError, Result};
use crate::utils::config::Config;
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction.
///
/// All chat providers implement this trait, allowing for easy swapping
/// between providers without changing application code. Generation is a
/// single blocking call; the caller gets the full completion text.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate with a system prompt ahead of the user prompt.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection.
///
/// | Provider | Notes |
/// |----------|-------|
/// | Ollama | Recommended for local inference |
/// | OpenAI | Any OpenAI-compatible endpoint |
#[derive(Debug, Clone)]
pub enum Provider {
    /// Ollama local LLM provider.
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::Ollama {
    ///     base_url: "http://localhost:11434".to_string(),
    ///     model: "llama3.2".to_string(),
    /// };
    /// ```
    #[cfg(feature = "ollama")]
    Ollama { base_url: String, model: String },

    /// OpenAI API provider (including compatible servers).
    #[cfg(feature = "openai")]
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
    },
}

impl Provider {
    /// Build the provider selected by the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] when the configured provider is
    /// unknown, compiled out, or missing required settings.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.llm.provider.as_str() {
            #[cfg(feature = "ollama")]
            "ollama" => Ok(Provider::Ollama {
                base_url: config.llm.ollama_url.clone(),
                model: config.llm.model.clone(),
            }),

            #[cfg(feature = "openai")]
            "openai" => {
                let api_key = config.llm.openai_api_key.clone().ok_or_else(|| {
                    AppError::Configuration("LLM_PROVIDER=openai requires OPENAI_API_KEY".into())
                })?;
                Ok(Provider::OpenAI {
                    api_key,
                    api_base: config.llm.openai_api_base.clone(),
                    model: config.llm.openai_model.clone(),
                })
            }

            other => Err(AppError::Configuration(format!(
                "LLM provider '{}' is not available in this build",
                other
            ))),
        }
    }

    /// Create a client instance for this provider.
    pub async fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        match self {
            #[cfg(feature = "ollama")]
            Provider::Ollama { base_url, model } => Ok(Box::new(
                super::ollama::OllamaClient::new(base_url.clone(), model.clone()),
            )),

            #[cfg(feature = "openai")]
            Provider::OpenAI {
                api_key,
                api_base,
                model,
            } => Ok(Box::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
            ))),
        }
    }

    /// Get a human-readable name for this provider.
    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "ollama")]
            Provider::Ollama { .. } => "Ollama",
            #[cfg(feature = "openai")]
            Provider::OpenAI { .. } => "OpenAI",
        }
    }

    /// The model identity this provider will run.
    pub fn model(&self) -> &str {
        match self {
            #[cfg(feature = "ollama")]
            Provider::Ollama { model, .. } => model,
            #[cfg(feature = "openai")]
            Provider::OpenAI { model, .. } => model,
        }
    }
}

/// Factory abstraction so request handlers (and tests) can obtain clients
/// without knowing the concrete provider.
#[async_trait]
pub trait LLMClientFactoryTrait: Send + Sync {
    /// Create a client using the factory's default provider.
    async fn create_default(&self) -> Result<Box<dyn LLMClient>>;
}

/// Configuration-based client factory.
///
/// # Example
///
/// ```rust,ignore
/// use lara::llm::{LLMClientFactory, Provider};
///
/// let factory = LLMClientFactory::new(Provider::Ollama {
///     base_url: "http://localhost:11434".to_string(),
///     model: "llama3.2".to_string(),
/// });
/// let client = factory.create_default().await?;
/// ```
pub struct LLMClientFactory {
    default_provider: Provider,
}

impl LLMClientFactory {
    /// Create a new factory with the specified default provider.
    pub fn new(default_provider: Provider) -> Self {
        Self { default_provider }
    }

    /// Get a reference to the default provider.
    pub fn default_provider(&self) -> &Provider {
        &self.default_provider
    }
}

#[async_trait]
impl LLMClientFactoryTrait for LLMClientFactory {
    async fn create_default(&self) -> Result<Box<dyn LLMClient>> {
        self.default_provider.create_client().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "ollama")]
    #[test]
    fn provider_name_and_model() {
        let ollama = Provider::Ollama {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
        };
        assert_eq!(ollama.name(), "Ollama");
        assert_eq!(ollama.model(), "llama3.2");
    }

    #[cfg(feature = "ollama")]
    #[test]
    fn factory_exposes_default_provider() {
        let provider = Provider::Ollama {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
        };

        let factory = LLMClientFactory::new(provider);
        assert_eq!(factory.default_provider().name(), "Ollama");
    }

    #[cfg(feature = "ollama")]
    #[tokio::test]
    async fn from_config_rejects_unknown_provider() {
        let mut config = Config::from_env().unwrap();
        config.llm.provider = "palm".to_string();

        let result = Provider::from_config(&config);
        let err = match result {
            Ok(_) => panic!("expected error"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("palm"));
    }
}
