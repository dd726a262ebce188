//! Best-effort JSON payload cache.
//!
//! Keys are `"<namespace>:<digest>"` (see [`crate::hashing::cache_key`]). Reads that fail
//! or return undecodable data are reported as misses; failed writes are logged and
//! dropped so they never fail the surrounding request.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::CacheNamespace;
use crate::hashing::cache_key;
use crate::kv::KvStore;

#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn KvStore>,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Returns the storage key for `parts` in `namespace`.
    #[inline]
    pub fn key<S: AsRef<str>>(namespace: CacheNamespace, parts: &[S]) -> String {
        cache_key(namespace.as_str(), parts)
    }

    /// Looks up a cached payload. Absent, expired and unreadable entries all yield `None`.
    pub async fn get<T, S>(&self, namespace: CacheNamespace, parts: &[S]) -> Option<T>
    where
        T: DeserializeOwned,
        S: AsRef<str>,
    {
        let key = Self::key(namespace, parts);

        let raw = match self.store.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(%key, "cache miss");
                return None;
            }
            Err(e) => {
                warn!(%key, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(payload) => {
                debug!(%key, "cache hit");
                Some(payload)
            }
            Err(e) => {
                warn!(%key, error = %e, "cached payload undecodable, treating as miss");
                None
            }
        }
    }

    /// Stores a payload with the namespace TTL. Never fails the caller.
    pub async fn set<T, S>(&self, namespace: CacheNamespace, parts: &[S], payload: &T)
    where
        T: Serialize + ?Sized,
        S: AsRef<str>,
    {
        let key = Self::key(namespace, parts);

        let raw = match serde_json::to_string(payload) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(%key, error = %e, "failed to serialize payload for cache");
                return;
            }
        };

        if let Err(e) = self.store.put(&key, raw, Some(namespace.ttl())).await {
            warn!(%key, error = %e, "cache write failed");
        }
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache").finish_non_exhaustive()
    }
}
