use std::time::Duration;

use crate::constants::{EXPLAIN_CACHE_TTL, SEARCH_CACHE_TTL};

pub const CACHE_STATUS_HEADER: &str = "X-Cache";

/// Endpoint a cached payload belongs to. Each namespace carries its own TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    Search,
    Explain,
}

impl CacheNamespace {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheNamespace::Search => "search",
            CacheNamespace::Explain => "explain",
        }
    }

    /// Search results: 1 hour. Explanations: 24 hours.
    #[inline]
    pub fn ttl(&self) -> Duration {
        match self {
            CacheNamespace::Search => SEARCH_CACHE_TTL,
            CacheNamespace::Explain => EXPLAIN_CACHE_TTL,
        }
    }
}

impl std::fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a response was served from cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    #[inline]
    pub fn as_header_value(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheStatus::Hit)
    }
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_header_value())
    }
}
