use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::vectordb::IndexError;

/// Errors raised while populating the index.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("embedding batch failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("index write failed: {0}")]
    Index(#[from] IndexError),

    #[error("embedder returned {actual} vectors for {expected} texts")]
    VectorCountMismatch { expected: usize, actual: usize },
}
