//! Deterministic embedder for tests and model-less local runs.
//!
//! Vectors are expanded from a BLAKE3 hash of the text and L2-normalized. Identical
//! text always maps to the identical vector; different text maps to unrelated vectors.

use async_trait::async_trait;

use super::{Embedder, EmbeddingError};
use crate::constants::DEFAULT_EMBEDDING_DIM;
use crate::hashing::expand_digest;

#[derive(Debug, Clone)]
pub struct StubEmbedder {
    embedding_dim: usize,
}

impl StubEmbedder {
    pub fn new() -> Self {
        Self::with_dim(DEFAULT_EMBEDDING_DIM)
    }

    pub fn with_dim(embedding_dim: usize) -> Self {
        Self { embedding_dim }
    }

    /// Synchronous form of [`Embedder::embed`].
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut bytes = vec![0u8; self.embedding_dim * 2];
        expand_digest(text.as_bytes(), &mut bytes);

        let mut vector: Vec<f32> = bytes
            .chunks_exact(2)
            .map(|c| {
                let v = u16::from_le_bytes([c[0], c[1]]) as f32 / u16::MAX as f32;
                v * 2.0 - 1.0
            })
            .collect();

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.vector_for(text))
    }

    fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    fn is_stub(&self) -> bool {
        true
    }
}
