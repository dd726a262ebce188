//! Similarity index integration (Qdrant).
//!
//! The index is populated by [`crate::seed`] and queried by [`crate::search`]. Both
//! sides share [`IndexMetadata`], so what is written is exactly what is read back.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use client::{QdrantIndex, SimilarityIndex};
pub use error::IndexError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockIndex, cosine_similarity};
pub use model::{IndexMatch, IndexMetadata, IndexPoint};

pub use crate::constants::DEFAULT_COLLECTION_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteConsistency {
    /// Wait for the operation to be fully indexed and searchable.
    /// Maps to `wait=true`.
    Strong,
    /// Return once the server acknowledges receipt.
    /// Maps to `wait=false`.
    Eventual,
}

impl From<WriteConsistency> for bool {
    fn from(c: WriteConsistency) -> bool {
        matches!(c, WriteConsistency::Strong)
    }
}
