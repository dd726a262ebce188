//! Flavor bridge library crate (used by the server and integration tests).
//!
//! Finds ingredients that are chemically similar to a query ingredient and explains
//! the connection in plain language.
//!
//! # Public API Surface
//!
//! ## Core Services
//! - [`SimilarityService`] - resolve, embed and query the index, minus the query itself
//! - [`ExplanationService`] - prompt a text generator about a set of matches
//! - [`IndexSeeder`] - populate the index from the catalog in batches
//! - [`RateLimiter`] - fixed-window per-client limiter that fails open
//!
//! ## Data
//! - [`Catalog`], [`Ingredient`] - immutable ingredient list
//! - [`IngredientResolver`] - four-rule fuzzy name matching
//! - [`ResponseCache`] - namespaced, best-effort JSON cache
//!
//! ## Collaborators
//! Each external dependency sits behind an `async_trait` trait so that it can be
//! swapped for an in-memory implementation:
//! - [`Embedder`]: [`HttpEmbedder`], [`StubEmbedder`]
//! - [`SimilarityIndex`]: [`QdrantIndex`]
//! - [`TextGenerator`]: [`GenaiGenerator`], [`CannedGenerator`]
//! - [`KvStore`]: [`MemoryKvStore`]
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod explain;
pub mod generation;
pub mod hashing;
pub mod kv;
pub mod ratelimit;
pub mod resolver;
pub mod search;
pub mod seed;
pub mod vectordb;

pub use cache::{CACHE_STATUS_HEADER, CacheNamespace, CacheStatus, ResponseCache};
pub use catalog::{Catalog, CatalogError, Ingredient, build_embedding_text, format_compounds};
pub use config::{Config, ConfigError};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use embedding::{
    Embedder, EmbeddingError, HttpEmbedder, HttpEmbedderConfig, StubEmbedder,
    validate_embedding_dim,
};
pub use explain::{
    ExplainError, ExplainOutcome, ExplainRequest, ExplainResponse, ExplanationService,
    MatchInput, build_explain_prompt,
};
#[cfg(any(test, feature = "mock"))]
pub use generation::MockGenerator;
pub use generation::{CannedGenerator, GenaiGenerator, GenerationError, TextGenerator};
pub use hashing::{cache_key, hash_match_names};
#[cfg(any(test, feature = "mock"))]
pub use kv::UnavailableKvStore;
pub use kv::{KvError, KvStore, MemoryKvStore};
pub use ratelimit::{RateDecision, RateLimitConfig, RateLimiter};
pub use resolver::{IngredientResolver, MatchRule};
pub use search::{SearchError, SearchMatch, SearchOutcome, SearchResponse, SimilarityService};
pub use seed::{IndexSeeder, SeedError, SeedReport};
#[cfg(any(test, feature = "mock"))]
pub use vectordb::MockIndex;
pub use vectordb::{
    IndexError, IndexMatch, IndexMetadata, IndexPoint, QdrantIndex, SimilarityIndex,
    WriteConsistency,
};
