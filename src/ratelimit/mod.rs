//! Fixed-window, per-client rate limiting.
//!
//! Counters live in the shared [`KvStore`] under `rate:<client>` as
//! `"<count>:<window end, unix ms>"`. The first request in a window stores `1` with a
//! TTL equal to the window. Later requests store `count + 1` with the time left until
//! the recorded window end, so activity never stretches the window. A counter read
//! after its window end is ignored even if the store still holds it, so a write that
//! lands late can never keep a client blocked.
//!
//! Concurrent requests can read the same pre-increment count and under-count by a
//! few near the threshold. That is accepted: single-key writes are the only atomicity
//! the store offers.
//!
//! The limiter fails open. Unidentifiable clients and store outages are always allowed.

pub mod config;


pub use config::RateLimitConfig;

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::kv::KvStore;

const KEY_PREFIX: &str = "rate:";

/// Per-client counter as stored in the key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RateCounter {
    count: u32,
    window_ends_at_ms: u64,
}

impl RateCounter {
    fn parse(raw: &str) -> Option<Self> {
        let (count, ends) = raw.trim().split_once(':')?;
        Some(Self {
            count: count.parse().ok()?,
            window_ends_at_ms: ends.parse().ok()?,
        })
    }

    fn encode(&self) -> String {
        format!("{}:{}", self.count, self.window_ends_at_ms)
    }

    /// Time left in the window, or `None` once it has ended.
    fn remaining(&self, now_ms: u64) -> Option<Duration> {
        self.window_ends_at_ms
            .checked_sub(now_ms)
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

fn unix_millis(at: SystemTime) -> u64 {
    at.duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Request may proceed. `count` is the position in the current window, or `0`
    /// when the request was not counted (no client id, or the store failed).
    Allowed { count: u32 },
    /// Request must be rejected before any other work.
    Blocked { retry_after_secs: u64 },
}

impl RateDecision {
    #[inline]
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn KvStore>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn KvStore>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Counts a request from `client_id` and decides whether it may proceed.
    pub async fn allow(&self, client_id: Option<&str>) -> RateDecision {
        let Some(client_id) = client_id.map(str::trim).filter(|id| !id.is_empty()) else {
            debug!("no client id, skipping rate limit");
            return RateDecision::Allowed { count: 0 };
        };

        let key = format!("{}{}", KEY_PREFIX, client_id);

        let now_ms = unix_millis(SystemTime::now());
        let live = match self.store.get(&key).await {
            Ok(value) => value
                .as_deref()
                .and_then(RateCounter::parse)
                .and_then(|c| c.remaining(now_ms).map(|left| (c, left))),
            Err(e) => {
                warn!(client = %client_id, error = %e, "rate counter read failed, allowing");
                return RateDecision::Allowed { count: 0 };
            }
        };

        let (counter, ttl) = match live {
            Some((current, _)) if current.count >= self.config.limit => {
                debug!(client = %client_id, count = current.count, "rate limit exceeded");
                return RateDecision::Blocked {
                    retry_after_secs: self.config.retry_after_secs,
                };
            }
            Some((current, left)) => (
                RateCounter {
                    count: current.count + 1,
                    ..current
                },
                left,
            ),
            None => {
                let window_ms = u64::try_from(self.config.window.as_millis()).unwrap_or(u64::MAX);
                (
                    RateCounter {
                        count: 1,
                        window_ends_at_ms: now_ms.saturating_add(window_ms),
                    },
                    self.config.window,
                )
            }
        };

        if let Err(e) = self.store.put(&key, counter.encode(), Some(ttl)).await {
            warn!(client = %client_id, error = %e, "rate counter write failed, allowing");
            return RateDecision::Allowed { count: 0 };
        }

        RateDecision::Allowed {
            count: counter.count,
        }
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
