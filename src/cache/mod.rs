//! Namespaced response cache over a [`KvStore`](crate::kv::KvStore).

pub mod response;
pub mod types;

#[cfg(test)]
mod tests;

pub use response::ResponseCache;
pub use types::{CACHE_STATUS_HEADER, CacheNamespace, CacheStatus};
