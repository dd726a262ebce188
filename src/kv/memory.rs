//! In-process [`KvStore`] backed by a moka cache with per-entry expiry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::sync::Cache;

use super::{KvError, KvStore};

/// Default max live entries before size-based eviction kicks in.
pub const DEFAULT_KV_CAPACITY: u64 = 100_000;

#[derive(Debug, Clone)]
struct StoredValue {
    data: Arc<str>,
    ttl: Option<Duration>,
}

struct EntryExpiry;

impl Expiry<String, StoredValue> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl.or(duration_until_expiry)
    }
}

/// Shared, cloneable in-memory store.
#[derive(Clone)]
pub struct MemoryKvStore {
    entries: Cache<String, StoredValue>,
}

impl MemoryKvStore {
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_KV_CAPACITY)
    }

    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .expire_after(EntryExpiry)
                .build(),
        }
    }

    /// Returns the number of entries (may include not-yet-collected expired ones).
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Runs pending moka maintenance (eviction, counters).
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }

    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for MemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryKvStore")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.entries.get(key).map(|v| v.data.to_string()))
    }

    async fn put(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), KvError> {
        self.entries.insert(
            key.to_string(),
            StoredValue {
                data: Arc::from(value),
                ttl,
            },
        );
        Ok(())
    }
}

/// Store that fails every call; used to exercise degrade-gracefully paths.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default, Clone)]
pub struct UnavailableKvStore;

#[cfg(any(test, feature = "mock"))]
#[async_trait]
impl KvStore for UnavailableKvStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, KvError> {
        Err(KvError::Unavailable("store offline".to_string()))
    }

    async fn put(&self, key: &str, _value: String, _ttl: Option<Duration>) -> Result<(), KvError> {
        Err(KvError::OperationFailed {
            key: key.to_string(),
            message: "store offline".to_string(),
        })
    }
}
