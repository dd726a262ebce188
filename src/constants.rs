//! Cross-cutting, shared constants.
//!
//! # Embedding-text invariant
//!
//! [`MAX_EMBEDDING_COMPOUNDS`] caps the compound list used when formatting an
//! ingredient for embedding. The seeder and the query path both go through
//! [`crate::catalog::build_embedding_text`], so the cap must never differ between
//! index population and query time or similarity scores stop meaning anything.

use std::time::Duration;

/// Output dimension of the default embedding model (`bge-small-en-v1.5`).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max compounds included in embedding text and index metadata.
pub const MAX_EMBEDDING_COMPOUNDS: usize = 20;

/// Neighbors requested from the index per search.
pub const DEFAULT_TOP_K: u64 = 6;

/// Matches rendered into the explanation prompt.
pub const EXPLAIN_PROMPT_MATCHES: usize = 3;

/// Output bound passed to the text generator.
pub const DEFAULT_MAX_TOKENS: u32 = 256;

/// Hex characters kept from the BLAKE3 digest in cache keys.
pub const CACHE_DIGEST_HEX_LEN: usize = 8;

pub const SEARCH_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

pub const EXPLAIN_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub const DEFAULT_RATE_LIMIT: u32 = 10;

pub const DEFAULT_RATE_WINDOW_SECS: u64 = 60;

/// Ingredients embedded and upserted per seed call.
pub const DEFAULT_SEED_BATCH_SIZE: usize = 40;

pub const DEFAULT_COLLECTION_NAME: &str = "ingredients";
