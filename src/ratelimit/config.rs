use std::time::Duration;

use crate::constants::{DEFAULT_RATE_LIMIT, DEFAULT_RATE_WINDOW_SECS};

/// Fixed-window limiter policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed per window. Default: `10`.
    pub limit: u32,
    /// Window length, starting at the first request. Default: `60s`.
    pub window: Duration,
    /// Value reported in `Retry-After` when blocked. Default: the window length in seconds.
    pub retry_after_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RATE_LIMIT,
            window: Duration::from_secs(DEFAULT_RATE_WINDOW_SECS),
            retry_after_secs: DEFAULT_RATE_WINDOW_SECS,
        }
    }
}

impl RateLimitConfig {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            retry_after_secs: window.as_secs().max(1),
        }
    }

    pub fn with_retry_after(mut self, secs: u64) -> Self {
        self.retry_after_secs = secs;
        self
    }
}
