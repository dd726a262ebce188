use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the ingredient catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate ingredient id: {id}")]
    DuplicateId { id: u32 },

    #[error("ingredient '{name}' has id 0 (ids are 1-based)")]
    InvalidId { name: String },
}
