//! Natural-language explanations of why matches resemble a query.

pub mod error;
pub mod prompt;


pub use error::ExplainError;
pub use prompt::{build_explain_prompt, format_match_line};

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, error, instrument};

use crate::cache::{CacheNamespace, CacheStatus, ResponseCache};
use crate::constants::DEFAULT_MAX_TOKENS;
use crate::generation::TextGenerator;
use crate::hashing::hash_match_names;

/// A match as supplied by the caller. Unknown fields (`id`, `score`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInput {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub compounds: Option<String>,
}

impl MatchInput {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            compounds: None,
        }
    }

    pub fn with_compounds(mut self, compounds: impl Into<String>) -> Self {
        self.compounds = Some(compounds.into());
        self
    }
}

/// Request body for an explanation. Missing and `null` fields deserialize empty so
/// that validation can name them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplainRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matches: Vec<MatchInput>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub query: String,
    pub explanation: String,
}

#[derive(Debug, Clone)]
pub struct ExplainOutcome {
    pub payload: ExplainResponse,
    pub cache: CacheStatus,
}

/// Checks that `query` is non-blank and `matches` is non-empty.
pub fn validate(query: &str, matches: &[MatchInput]) -> Result<(), ExplainError> {
    let mut fields = Vec::new();
    if query.trim().is_empty() {
        fields.push("query");
    }
    if matches.is_empty() {
        fields.push("matches");
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ExplainError::Validation { fields })
    }
}

#[derive(Clone)]
pub struct ExplanationService {
    generator: Arc<dyn TextGenerator>,
    cache: ResponseCache,
    max_tokens: u32,
}

impl ExplanationService {
    pub fn new(generator: Arc<dyn TextGenerator>, cache: ResponseCache) -> Self {
        Self {
            generator,
            cache,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Cache key parts: the query plus an order-independent digest of match names.
    pub fn cache_parts(query: &str, matches: &[MatchInput]) -> [String; 2] {
        let names = hash_match_names(matches.iter().map(|m| m.name.as_str()));
        [query.to_string(), names]
    }

    #[instrument(skip(self, matches), fields(matches = matches.len()))]
    pub async fn explain(
        &self,
        query: &str,
        matches: &[MatchInput],
    ) -> Result<ExplainOutcome, ExplainError> {
        validate(query, matches)?;

        let parts = Self::cache_parts(query, matches);
        if let Some(payload) = self
            .cache
            .get::<ExplainResponse, _>(CacheNamespace::Explain, &parts)
            .await
        {
            return Ok(ExplainOutcome {
                payload,
                cache: CacheStatus::Hit,
            });
        }

        let prompt = build_explain_prompt(query, matches);
        debug!(model = self.generator.model(), "generating explanation");

        let explanation = self
            .generator
            .generate(&prompt, self.max_tokens)
            .await
            .map_err(|e| {
                error!(error = %e, "generation failed");
                ExplainError::from(e)
            })?;

        let payload = ExplainResponse {
            query: query.to_string(),
            explanation,
        };
        self.cache.set(CacheNamespace::Explain, &parts, &payload).await;

        Ok(ExplainOutcome {
            payload,
            cache: CacheStatus::Miss,
        })
    }
}

impl std::fmt::Debug for ExplanationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplanationService")
            .field("model", &self.generator.model())
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
