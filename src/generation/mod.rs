//! Text generation for explanations.
//!
//! [`GenaiGenerator`] routes a single-turn prompt through `genai`, which picks the
//! provider from the model name. [`CannedGenerator`] returns a fixed reply and backs
//! the mock-provider mode used for local runs without credentials.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use client::{CannedGenerator, GenaiGenerator};
pub use error::GenerationError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerator;

use async_trait::async_trait;

/// Produces free text from a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a completion for `prompt`, capped at `max_tokens`.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
