//! Similarity search over the ingredient index.
//!
//! A query is resolved against the catalog, embedded with the same text format the
//! seeder used, and sent to the index. Neighbours carrying the resolved ingredient's
//! own name are dropped; everything else keeps the index's order.

pub mod error;


pub use error::SearchError;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::cache::{CacheNamespace, CacheStatus, ResponseCache};
use crate::catalog::build_embedding_text;
use crate::constants::DEFAULT_TOP_K;
use crate::embedding::Embedder;
use crate::resolver::IngredientResolver;
use crate::vectordb::{IndexMatch, SimilarityIndex};

/// One similar ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub id: String,
    pub score: f32,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub compounds: String,
}

impl From<IndexMatch> for SearchMatch {
    fn from(m: IndexMatch) -> Self {
        Self {
            id: m.id,
            score: m.score,
            name: m.metadata.name,
            description: m.metadata.description,
            compounds: m.metadata.compounds,
        }
    }
}

/// Body of a successful search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query exactly as the caller sent it.
    pub query: String,
    pub matches: Vec<SearchMatch>,
}

/// A search result plus where it came from.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub payload: SearchResponse,
    pub cache: CacheStatus,
}

/// Drops every match whose name equals `name`, ignoring case. Order is preserved.
pub fn exclude_self(matches: Vec<IndexMatch>, name: &str) -> Vec<SearchMatch> {
    let own = name.trim().to_lowercase();
    matches
        .into_iter()
        .filter(|m| m.metadata.name.trim().to_lowercase() != own)
        .map(SearchMatch::from)
        .collect()
}

/// Orchestrates resolve, cache, embed and index query.
#[derive(Clone)]
pub struct SimilarityService {
    resolver: Arc<IngredientResolver>,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn SimilarityIndex>,
    cache: ResponseCache,
    top_k: u64,
}

impl SimilarityService {
    pub fn new(
        resolver: Arc<IngredientResolver>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn SimilarityIndex>,
        cache: ResponseCache,
    ) -> Self {
        Self {
            resolver,
            embedder,
            index,
            cache,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Overrides the neighbour count requested from the index.
    pub fn with_top_k(mut self, top_k: u64) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> u64 {
        self.top_k
    }

    pub fn resolver(&self) -> &Arc<IngredientResolver> {
        &self.resolver
    }

    #[instrument(skip(self), fields(top_k = self.top_k))]
    pub async fn search(&self, raw_query: &str) -> Result<SearchOutcome, SearchError> {
        let ingredient =
            self.resolver
                .resolve(raw_query)
                .ok_or_else(|| SearchError::NotFound {
                    query: raw_query.to_string(),
                })?;

        let parts = [raw_query];
        if let Some(payload) = self
            .cache
            .get::<SearchResponse, _>(CacheNamespace::Search, &parts)
            .await
        {
            return Ok(SearchOutcome {
                payload,
                cache: CacheStatus::Hit,
            });
        }

        let text = build_embedding_text(ingredient);
        debug!(ingredient = %ingredient.name, %text, "embedding query");

        let vector = self.embedder.embed(&text).await.map_err(|e| {
            error!(error = %e, "embedding failed");
            SearchError::from(e)
        })?;

        let neighbours = self.index.query(vector, self.top_k).await.map_err(|e| {
            error!(error = %e, "index query failed");
            SearchError::from(e)
        })?;

        let payload = SearchResponse {
            query: raw_query.to_string(),
            matches: exclude_self(neighbours, &ingredient.name),
        };

        self.cache.set(CacheNamespace::Search, &parts, &payload).await;

        Ok(SearchOutcome {
            payload,
            cache: CacheStatus::Miss,
        })
    }
}

impl std::fmt::Debug for SimilarityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityService")
            .field("top_k", &self.top_k)
            .finish_non_exhaustive()
    }
}
