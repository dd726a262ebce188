//! OpenAI-compatible embeddings client.
//!
//! Sends `{"model": .., "input": [..]}` and expects `{"data": [{"index", "embedding"}]}`.
//! Works with OpenAI, Text Embeddings Inference, vLLM, Ollama and similar servers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Embedder, EmbeddingError, validate_embedding_dim};
use crate::constants::DEFAULT_EMBEDDING_DIM;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default model name sent to the provider.
pub const DEFAULT_EMBEDDING_MODEL: &str = "bge-small-en-v1.5";

#[derive(Debug, Clone)]
pub struct HttpEmbedderConfig {
    /// Full URL of the embeddings endpoint, e.g. `http://localhost:8080/v1/embeddings`.
    pub endpoint: String,
    pub model: String,
    /// Sent as a bearer token when set.
    pub api_key: Option<String>,
    pub embedding_dim: usize,
    pub timeout: Duration,
}

impl HttpEmbedderConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: None,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    pub fn embedding_dim(mut self, dim: usize) -> Self {
        self.embedding_dim = dim;
        self
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!("endpoint must be an http(s) URL, got '{}'", self.endpoint),
            });
        }
        if self.model.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model name is empty".to_string(),
            });
        }
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Serialize)]
pub(crate) struct EmbeddingRequest<'a> {
    pub model: &'a str,
    pub input: &'a [String],
}

#[derive(Deserialize)]
pub(crate) struct EmbeddingResponse {
    pub data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
pub(crate) struct EmbeddingDatum {
    #[serde(default)]
    pub index: usize,
    pub embedding: Vec<f32>,
}

/// Orders provider output by `index` and checks count and dimensions.
pub(crate) fn collect_vectors(
    response: EmbeddingResponse,
    expected_count: usize,
    expected_dim: usize,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    if response.data.len() != expected_count {
        return Err(EmbeddingError::MalformedResponse {
            reason: format!(
                "expected {} embeddings, got {}",
                expected_count,
                response.data.len()
            ),
        });
    }

    let mut data = response.data;
    data.sort_by_key(|d| d.index);

    data.into_iter()
        .map(|d| {
            validate_embedding_dim(&d.embedding, expected_dim)?;
            Ok(d.embedding)
        })
        .collect()
}

pub struct HttpEmbedder {
    http: HttpClient,
    config: HttpEmbedderConfig,
}

impl HttpEmbedder {
    pub fn new(config: HttpEmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;
        let http = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &HttpEmbedderConfig {
        &self.config
    }
}

impl std::fmt::Debug for HttpEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEmbedder")
            .field("endpoint", &self.config.endpoint)
            .field("model", &self.config.model)
            .field("embedding_dim", &self.config.embedding_dim)
            .finish()
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors.pop().ok_or_else(|| EmbeddingError::MalformedResponse {
            reason: "empty embedding response".to_string(),
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = EmbeddingRequest {
            model: &self.config.model,
            input: texts,
        };

        let mut request = self.http.post(&self.config.endpoint).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: EmbeddingResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        debug!(count = texts.len(), "embedded batch");
        collect_vectors(parsed, texts.len(), self.config.embedding_dim)
    }

    fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }
}
