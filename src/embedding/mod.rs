//! Embedding generation via a locally served model API.
//!
//! Provides the [`EmbeddingProvider`] trait and the Ollama implementation.
//! The provider is created via [`create_provider`] from configuration. All
//! requests are sequential — one sample, one model, one HTTP call.

pub mod ollama;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from an embedding request. `ModelMissing` is separated out so the
/// embed loop can abandon a model that is not installed instead of failing
/// the same way on every remaining sample.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("model '{0}' is not installed on the embedding server")]
    ModelMissing(String),
    #[error("embedding server returned an error: {0}")]
    Server(String),
    #[error("embedding request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Trait for turning text into vectors through a model server.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed `text` with the named model.
    async fn embed(&self, model: &str, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// List the model tags installed on the server.
    async fn list_models(&self) -> Result<Vec<String>, EmbeddingError>;
}

/// Create an embedding provider from config.
///
/// Currently only `"ollama"` is supported. The server is not contacted here;
/// a dead server surfaces on the first request (or via `quarry doctor`).
pub fn create_provider(
    config: &crate::config::EmbeddingConfig,
) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "ollama" => {
            let provider = ollama::OllamaProvider::new(&config.base_url)?;
            Ok(Box::new(provider))
        }
        other => anyhow::bail!("unknown embedding provider: {other}. Supported: ollama"),
    }
}
