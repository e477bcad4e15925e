//! Ollama embedding provider.
//!
//! Speaks the daemon's HTTP API on a configurable base URL:
//! `POST /api/embeddings` for vectors, `GET /api/tags` for the installed
//! model list. A 404 on an embeddings request means the model tag is not
//! pulled, which callers treat differently from a dead server.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{EmbeddingError, EmbeddingProvider};

pub struct OllamaProvider {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaProvider {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("quarry/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaProvider {
    async fn embed(&self, model: &str, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = EmbeddingsRequest {
            model,
            prompt: text,
        };

        let response = self
            .http
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(EmbeddingError::ModelMissing(model.to_string())),
            status if !status.is_success() => {
                let detail = response.text().await.unwrap_or_default();
                Err(EmbeddingError::Server(format!(
                    "HTTP {status}: {}",
                    detail.trim()
                )))
            }
            _ => {
                let parsed: EmbeddingsResponse = response.json().await?;
                if parsed.embedding.is_empty() {
                    return Err(EmbeddingError::Server(format!(
                        "model '{model}' returned an empty vector"
                    )));
                }
                Ok(parsed.embedding)
            }
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, EmbeddingError> {
        let response = self
            .http
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::Server(format!("HTTP {status}")));
        }

        let parsed: TagsResponse = response.json().await?;
        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_embeddings_response() {
        let body = r#"{"embedding": [0.25, -0.5, 1.0]}"#;
        let parsed: EmbeddingsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.embedding, vec![0.25, -0.5, 1.0]);
    }

    #[test]
    fn parse_tags_response() {
        let body = r#"{
            "models": [
                {"name": "nomic-embed-text:latest", "size": 274302450},
                {"name": "llama3.2:latest", "size": 2019393189}
            ]
        }"#;
        let parsed: TagsResponse = serde_json::from_str(body).unwrap();
        let names: Vec<String> = parsed.models.into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["nomic-embed-text:latest", "llama3.2:latest"]);
    }

    #[test]
    fn request_body_shape() {
        let body = EmbeddingsRequest {
            model: "nomic-embed-text:latest",
            prompt: "class A {}",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "nomic-embed-text:latest");
        assert_eq!(json["prompt"], "class A {}");
    }

    #[test]
    fn provider_trims_trailing_slash() {
        let provider = OllamaProvider::new("http://localhost:11434/").unwrap();
        assert_eq!(provider.base_url, "http://localhost:11434");
    }
}
