use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by similarity index operations.
pub enum IndexError {
    /// Could not connect to the index endpoint.
    #[error("failed to connect to index at '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    /// Collection creation failed.
    #[error("failed to create collection '{collection}': {message}")]
    CreateCollectionFailed { collection: String, message: String },

    /// Collection does not exist.
    #[error("collection not found: {collection}")]
    CollectionNotFound { collection: String },

    #[error("failed to upsert points to '{collection}': {message}")]
    UpsertFailed { collection: String, message: String },

    #[error("failed to query '{collection}': {message}")]
    QueryFailed { collection: String, message: String },

    /// Vector dimension mismatch.
    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },
}
