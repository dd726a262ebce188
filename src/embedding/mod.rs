//! Text embedding providers.
//!
//! - [`http`] talks to an OpenAI-compatible `/embeddings` endpoint.
//! - [`stub`] derives deterministic vectors from a hash of the text (tests, local runs).

mod error;
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod stub;

#[cfg(test)]
mod tests;

pub use error::EmbeddingError;
pub use http::{DEFAULT_EMBEDDING_MODEL, HttpEmbedder, HttpEmbedderConfig};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
pub use stub::StubEmbedder;

use async_trait::async_trait;

#[async_trait]
/// Turns text into a fixed-size vector.
pub trait Embedder: Send + Sync {
    /// Embeds a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embeds many texts, returning vectors in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    /// Output dimension.
    fn embedding_dim(&self) -> usize;

    /// `true` if vectors are synthetic rather than model output.
    fn is_stub(&self) -> bool {
        false
    }
}

/// Checks that `vector` has `expected` dimensions.
pub fn validate_embedding_dim(vector: &[f32], expected: usize) -> Result<(), EmbeddingError> {
    if vector.len() != expected {
        return Err(EmbeddingError::InvalidDimension {
            expected,
            actual: vector.len(),
        });
    }
    Ok(())
}
