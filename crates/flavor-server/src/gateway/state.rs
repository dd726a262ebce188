use std::sync::Arc;

use flavor::cache::ResponseCache;
use flavor::catalog::Catalog;
use flavor::config::{Config, DEFAULT_CLIENT_IP_HEADERS};
use flavor::constants::{DEFAULT_MAX_TOKENS, DEFAULT_TOP_K};
use flavor::embedding::Embedder;
use flavor::explain::ExplanationService;
use flavor::generation::TextGenerator;
use flavor::kv::KvStore;
use flavor::ratelimit::{RateLimitConfig, RateLimiter};
use flavor::resolver::IngredientResolver;
use flavor::search::SimilarityService;
use flavor::seed::IndexSeeder;
use flavor::vectordb::SimilarityIndex;

/// Tunables applied when wiring [`AppState`].
#[derive(Debug, Clone)]
pub struct StateSettings {
    pub top_k: u64,
    pub max_tokens: u32,
    pub rate_limit: RateLimitConfig,
    /// Lower-cased header names consulted, in order, for the client address.
    pub client_ip_headers: Vec<String>,
}

impl Default for StateSettings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_tokens: DEFAULT_MAX_TOKENS,
            rate_limit: RateLimitConfig::default(),
            client_ip_headers: DEFAULT_CLIENT_IP_HEADERS
                .iter()
                .map(|h| h.to_string())
                .collect(),
        }
    }
}

impl From<&Config> for StateSettings {
    fn from(config: &Config) -> Self {
        Self {
            top_k: config.top_k,
            max_tokens: config.max_tokens,
            rate_limit: config.rate_limit_config(),
            client_ip_headers: config.client_ip_headers.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SimilarityService>,

    pub explain: Arc<ExplanationService>,

    pub seeder: Arc<IndexSeeder>,

    pub limiter: Arc<RateLimiter>,

    pub index: Arc<dyn SimilarityIndex>,

    pub embedder_is_stub: bool,

    pub client_ip_headers: Arc<[String]>,
}

impl AppState {
    /// Wires every service over shared collaborators. Search, explain and the
    /// limiter all use the same key-value store.
    pub fn new(
        catalog: Arc<Catalog>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn SimilarityIndex>,
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn KvStore>,
        settings: StateSettings,
    ) -> Self {
        let cache = ResponseCache::new(store.clone());
        let resolver = Arc::new(IngredientResolver::new(catalog.clone()));

        let search = SimilarityService::new(resolver, embedder.clone(), index.clone(), cache.clone())
            .with_top_k(settings.top_k);
        let explain =
            ExplanationService::new(generator, cache).with_max_tokens(settings.max_tokens);
        let seeder = IndexSeeder::new(catalog, embedder.clone(), index.clone());
        let limiter = RateLimiter::new(store, settings.rate_limit);

        Self {
            search: Arc::new(search),
            explain: Arc::new(explain),
            seeder: Arc::new(seeder),
            limiter: Arc::new(limiter),
            index,
            embedder_is_stub: embedder.is_stub(),
            client_ip_headers: settings.client_ip_headers.into(),
        }
    }
}
