use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::debug;

use super::TextGenerator;
use super::error::GenerationError;

/// Reply returned by [`CannedGenerator`].
pub const CANNED_EXPLANATION: &str = "These ingredients share overlapping aroma compounds, \
so they reinforce each other's savory and roasted notes when paired.";

/// [`TextGenerator`] backed by a `genai` client.
#[derive(Clone)]
pub struct GenaiGenerator {
    client: Client,
    model: String,
}

impl GenaiGenerator {
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_client(Client::default(), model)
    }

    pub fn with_client(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for GenaiGenerator {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        let options = ChatOptions::default().with_max_tokens(max_tokens);

        debug!(model = %self.model, max_tokens, "sending generation request");
        let response = self
            .client
            .exec_chat(&self.model, request, Some(&options))
            .await?;

        let text = response
            .first_text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        Ok(text.to_string())
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Returns [`CANNED_EXPLANATION`] for every prompt.
#[derive(Debug, Clone, Default)]
pub struct CannedGenerator;

impl CannedGenerator {
    pub const MODEL: &'static str = "canned";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, GenerationError> {
        Ok(CANNED_EXPLANATION.to_string())
    }

    fn model(&self) -> &str {
        Self::MODEL
    }
}
