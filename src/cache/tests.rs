use super::*;
use crate::kv::{KvStore, MemoryKvStore, UnavailableKvStore};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn cache_with_store() -> (ResponseCache, Arc<MemoryKvStore>) {
    let store = Arc::new(MemoryKvStore::new());
    (ResponseCache::new(store.clone()), store)
}

#[tokio::test]
async fn test_set_then_get_round_trip() {
    let (cache, _) = cache_with_store();
    let payload = json!({"query": "Miso", "matches": [{"id": "5", "score": 0.91}]});

    cache.set(CacheNamespace::Search, &["Miso"], &payload).await;
    let cached: Option<serde_json::Value> = cache.get(CacheNamespace::Search, &["Miso"]).await;

    assert_eq!(cached, Some(payload));
}

#[tokio::test]
async fn test_get_normalizes_parts() {
    let (cache, _) = cache_with_store();
    cache
        .set(CacheNamespace::Search, &["Miso"], &json!({"query": "Miso"}))
        .await;

    let cached: Option<serde_json::Value> = cache.get(CacheNamespace::Search, &[" miso "]).await;
    assert!(cached.is_some());
}

#[tokio::test]
async fn test_namespaces_are_isolated() {
    let (cache, _) = cache_with_store();
    cache
        .set(CacheNamespace::Search, &["Miso"], &json!({"a": 1}))
        .await;

    let other: Option<serde_json::Value> = cache.get(CacheNamespace::Explain, &["Miso"]).await;
    assert!(other.is_none());
}

#[tokio::test]
async fn test_key_shape() {
    let key = ResponseCache::key(CacheNamespace::Explain, &["Miso", "abcd1234"]);
    assert!(key.starts_with("explain:"));
    assert_eq!(key.len(), "explain:".len() + crate::constants::CACHE_DIGEST_HEX_LEN);
}

#[tokio::test]
async fn test_written_under_namespaced_key() {
    let (cache, store) = cache_with_store();
    cache
        .set(CacheNamespace::Search, &["Kombu"], &json!({"q": 1}))
        .await;

    let key = ResponseCache::key(CacheNamespace::Search, &["kombu"]);
    let raw = store.get(&key).await.unwrap();
    assert_eq!(raw.as_deref(), Some(r#"{"q":1}"#));
}

#[tokio::test]
async fn test_undecodable_payload_is_miss() {
    let (cache, store) = cache_with_store();
    let key = ResponseCache::key(CacheNamespace::Search, &["miso"]);
    store
        .put(&key, "not json".to_string(), Some(Duration::from_secs(60)))
        .await
        .unwrap();

    let cached: Option<serde_json::Value> = cache.get(CacheNamespace::Search, &["miso"]).await;
    assert!(cached.is_none());
}

#[tokio::test]
async fn test_store_failure_is_miss_and_write_is_swallowed() {
    let cache = ResponseCache::new(Arc::new(UnavailableKvStore));

    cache
        .set(CacheNamespace::Explain, &["Miso"], &json!({"x": 1}))
        .await;
    let cached: Option<serde_json::Value> = cache.get(CacheNamespace::Explain, &["Miso"]).await;
    assert!(cached.is_none());
}

#[test]
fn test_namespace_ttls() {
    assert_eq!(CacheNamespace::Search.ttl(), Duration::from_secs(3600));
    assert_eq!(CacheNamespace::Explain.ttl(), Duration::from_secs(86_400));
    assert!(CacheNamespace::Explain.ttl() > CacheNamespace::Search.ttl());
}

#[test]
fn test_cache_status_header_values() {
    assert_eq!(CacheStatus::Hit.as_header_value(), "HIT");
    assert_eq!(CacheStatus::Miss.to_string(), "MISS");
    assert!(CacheStatus::Hit.is_hit());
    assert!(!CacheStatus::Miss.is_hit());
}
