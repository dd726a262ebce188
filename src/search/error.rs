use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::vectordb::IndexError;

/// Errors returned by [`SimilarityService::search`](super::SimilarityService::search).
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query does not resolve to a catalog ingredient.
    #[error("ingredient not found: {query}")]
    NotFound { query: String },

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("index query failed: {0}")]
    Index(#[from] IndexError),
}

impl SearchError {
    /// `true` for collaborator failures (as opposed to an unresolved query).
    pub fn is_upstream(&self) -> bool {
        !matches!(self, SearchError::NotFound { .. })
    }

    /// Human-readable explanation suitable for a response body.
    pub fn message(&self) -> String {
        match self {
            SearchError::NotFound { query } => format!(
                "'{}' is not in the ingredient catalog. Try a different spelling or a more common name.",
                query
            ),
            _ => "internal server error".to_string(),
        }
    }
}
