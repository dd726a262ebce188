//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `FLAVOR_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_COLLECTION_NAME, DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_TOKENS, DEFAULT_RATE_LIMIT,
    DEFAULT_RATE_WINDOW_SECS, DEFAULT_TOP_K,
};
use crate::embedding::{DEFAULT_EMBEDDING_MODEL, HttpEmbedderConfig};
use crate::kv::DEFAULT_KV_CAPACITY;
use crate::ratelimit::RateLimitConfig;

/// Default Qdrant URL used when `FLAVOR_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default generation model used when `FLAVOR_LLM_MODEL` is not set.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Headers consulted for the client address, in order.
pub const DEFAULT_CLIENT_IP_HEADERS: [&str; 2] = ["cf-connecting-ip", "x-forwarded-for"];

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `FLAVOR_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8787`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Ingredient catalog JSON. Default: the built-in catalog.
    pub catalog_path: Option<PathBuf>,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Qdrant collection holding ingredient vectors. Default: `ingredients`.
    pub collection: String,

    /// OpenAI-compatible embeddings endpoint. Unset selects the stub embedder.
    pub embedding_url: Option<String>,

    pub embedding_model: String,

    pub embedding_api_key: Option<String>,

    /// Vector dimension. Default: `384`.
    pub embedding_dim: usize,

    /// Model name passed to the generation client. Default: `gpt-4o-mini`.
    pub llm_model: String,

    /// Serve canned explanations instead of calling a provider.
    pub mock_provider: bool,

    /// Token cap for explanations. Default: `256`.
    pub max_tokens: u32,

    /// Neighbours requested per search. Default: `6`.
    pub top_k: u64,

    /// Requests per client per window. Default: `10`.
    pub rate_limit: u32,

    /// Rate window length in seconds. Default: `60`.
    pub rate_window_secs: u64,

    /// Headers read (in order) to identify the client.
    pub client_ip_headers: Vec<String>,

    /// Max entries in the in-process key-value store. Default: `100_000`.
    pub kv_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8787,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            catalog_path: None,
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection: DEFAULT_COLLECTION_NAME.to_string(),
            embedding_url: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_api_key: None,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            mock_provider: false,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_k: DEFAULT_TOP_K,
            rate_limit: DEFAULT_RATE_LIMIT,
            rate_window_secs: DEFAULT_RATE_WINDOW_SECS,
            client_ip_headers: DEFAULT_CLIENT_IP_HEADERS
                .iter()
                .map(|h| h.to_string())
                .collect(),
            kv_capacity: DEFAULT_KV_CAPACITY,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "FLAVOR_PORT";
    const ENV_BIND_ADDR: &'static str = "FLAVOR_BIND_ADDR";
    const ENV_CATALOG_PATH: &'static str = "FLAVOR_CATALOG_PATH";
    const ENV_QDRANT_URL: &'static str = "FLAVOR_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "FLAVOR_COLLECTION";
    const ENV_EMBEDDING_URL: &'static str = "FLAVOR_EMBEDDING_URL";
    const ENV_EMBEDDING_MODEL: &'static str = "FLAVOR_EMBEDDING_MODEL";
    const ENV_EMBEDDING_API_KEY: &'static str = "FLAVOR_EMBEDDING_API_KEY";
    const ENV_EMBEDDING_DIM: &'static str = "FLAVOR_EMBEDDING_DIM";
    const ENV_LLM_MODEL: &'static str = "FLAVOR_LLM_MODEL";
    const ENV_MOCK_PROVIDER: &'static str = "FLAVOR_MOCK_PROVIDER";
    const ENV_MAX_TOKENS: &'static str = "FLAVOR_MAX_TOKENS";
    const ENV_TOP_K: &'static str = "FLAVOR_TOP_K";
    const ENV_RATE_LIMIT: &'static str = "FLAVOR_RATE_LIMIT";
    const ENV_RATE_WINDOW_SECS: &'static str = "FLAVOR_RATE_WINDOW_SECS";
    const ENV_CLIENT_IP_HEADER: &'static str = "FLAVOR_CLIENT_IP_HEADER";
    const ENV_KV_CAPACITY: &'static str = "FLAVOR_KV_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let catalog_path = Self::parse_optional_string_from_env(Self::ENV_CATALOG_PATH)
            .map(PathBuf::from);
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let collection = Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection);
        let embedding_url = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_URL);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let embedding_api_key = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_API_KEY);
        let embedding_dim = Self::parse_u64_from_env(
            Self::ENV_EMBEDDING_DIM,
            defaults.embedding_dim as u64,
        ) as usize;
        let llm_model = Self::parse_string_from_env(Self::ENV_LLM_MODEL, defaults.llm_model);
        let mock_provider = Self::parse_bool_from_env(Self::ENV_MOCK_PROVIDER)?;
        let max_tokens =
            Self::parse_u64_from_env(Self::ENV_MAX_TOKENS, defaults.max_tokens as u64);
        let top_k = Self::parse_u64_from_env(Self::ENV_TOP_K, defaults.top_k);
        let rate_limit =
            Self::parse_u64_from_env(Self::ENV_RATE_LIMIT, defaults.rate_limit as u64);
        let rate_window_secs =
            Self::parse_u64_from_env(Self::ENV_RATE_WINDOW_SECS, defaults.rate_window_secs);
        let client_ip_headers = Self::parse_optional_string_from_env(Self::ENV_CLIENT_IP_HEADER)
            .map(|v| {
                v.split(',')
                    .map(|h| h.trim().to_ascii_lowercase())
                    .filter(|h| !h.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.client_ip_headers);
        let kv_capacity = Self::parse_u64_from_env(Self::ENV_KV_CAPACITY, defaults.kv_capacity);

        Ok(Self {
            port,
            bind_addr,
            catalog_path,
            qdrant_url,
            collection,
            embedding_url,
            embedding_model,
            embedding_api_key,
            embedding_dim,
            llm_model,
            mock_provider,
            max_tokens: Self::narrow_u32(Self::ENV_MAX_TOKENS, max_tokens)?,
            top_k,
            rate_limit: Self::narrow_u32(Self::ENV_RATE_LIMIT, rate_limit)?,
            rate_window_secs,
            client_ip_headers,
            kv_capacity,
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_zero = [
            (Self::ENV_EMBEDDING_DIM, self.embedding_dim as u64),
            (Self::ENV_MAX_TOKENS, self.max_tokens as u64),
            (Self::ENV_TOP_K, self.top_k),
            (Self::ENV_RATE_LIMIT, self.rate_limit as u64),
            (Self::ENV_RATE_WINDOW_SECS, self.rate_window_secs),
        ];
        for (name, value) in non_zero {
            if value == 0 {
                return Err(ConfigError::MustBeNonZero { name });
            }
        }

        if self.client_ip_headers.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_CLIENT_IP_HEADER,
                value: String::new(),
            });
        }

        if let Some(ref path) = self.catalog_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Limiter policy derived from `rate_limit` and `rate_window_secs`.
    pub fn rate_limit_config(&self) -> RateLimitConfig {
        RateLimitConfig::new(self.rate_limit, Duration::from_secs(self.rate_window_secs))
    }

    /// HTTP embedder settings, or `None` when no endpoint is configured.
    pub fn embedder_config(&self) -> Option<HttpEmbedderConfig> {
        self.embedding_url.as_ref().map(|url| {
            HttpEmbedderConfig::new(url.clone())
                .model(self.embedding_model.clone())
                .api_key(self.embedding_api_key.clone())
                .embedding_dim(self.embedding_dim)
        })
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_string_from_env(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &'static str) -> Result<bool, ConfigError> {
        match Self::parse_optional_string_from_env(var_name) {
            None => Ok(false),
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    name: var_name,
                    value,
                }),
            },
        }
    }

    fn narrow_u32(var_name: &'static str, value: u64) -> Result<u32, ConfigError> {
        u32::try_from(value).map_err(|_| ConfigError::InvalidValue {
            name: var_name,
            value: value.to_string(),
        })
    }
}
