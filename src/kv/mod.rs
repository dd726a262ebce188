//! Key-value store shared by the response cache and the rate limiter.
//!
//! The store owns all cross-request mutable state. Entries expire on their own; the
//! rest of the crate never performs eviction bookkeeping beyond choosing a TTL at
//! write time.

pub mod error;
pub mod memory;


pub use error::KvError;
pub use memory::{DEFAULT_KV_CAPACITY, MemoryKvStore};
#[cfg(any(test, feature = "mock"))]
pub use memory::UnavailableKvStore;

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
/// Single-key string store with optional per-entry expiry.
pub trait KvStore: Send + Sync {
    /// Returns the live value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Writes `value` under `key`.
    ///
    /// `Some(ttl)` sets a fresh expiry. `None` keeps the remaining expiry of a live
    /// entry, or stores without expiry if the key is new. A key whose expiry has
    /// lapsed counts as new.
    async fn put(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), KvError>;
}
