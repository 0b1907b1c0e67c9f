//! LLM Provider Clients and Abstractions
//!
//! A unified interface over chat-model backends. The rest of the
//! application talks to the [`LLMClient`] trait and never to a concrete
//! provider.
//!
//! # Supported Providers
//!
//! Enable providers via Cargo features:
//! - `ollama` (default) - Local Ollama server
//! - `openai` - OpenAI API and compatible endpoints (llama.cpp server, vLLM)

/// Core LLM client trait, provider enum, and client factory.
pub mod client;

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "openai")]
pub mod openai;

pub use client::{LLMClient, LLMClientFactory, LLMClientFactoryTrait, Provider};
