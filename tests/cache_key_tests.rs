//! Integration tests for cache key derivation.

use flavor::{CacheNamespace, ExplanationService, MatchInput, ResponseCache, hash_match_names};

#[test]
fn test_search_keys_normalize_query() {
    let a = ResponseCache::key(CacheNamespace::Search, &["Miso"]);
    let b = ResponseCache::key(CacheNamespace::Search, &[" miso "]);
    let c = ResponseCache::key(CacheNamespace::Search, &["MISO"]);

    assert_eq!(a, b);
    assert_eq!(b, c);
    assert!(a.starts_with("search:"));
    assert_eq!(a.len(), "search:".len() + 8);
}

#[test]
fn test_namespaces_do_not_collide() {
    let search = ResponseCache::key(CacheNamespace::Search, &["Miso"]);
    let explain = ResponseCache::key(CacheNamespace::Explain, &["Miso"]);

    assert_ne!(search, explain);
    assert_eq!(search[search.len() - 8..], explain[explain.len() - 8..]);
}

#[test]
fn test_match_name_digest_is_order_independent() {
    assert_eq!(
        hash_match_names(["Soy Sauce", "Kombu", "Anchovy"]),
        hash_match_names(["anchovy", " KOMBU", "soy sauce"])
    );
    assert_ne!(
        hash_match_names(["Soy Sauce", "Kombu"]),
        hash_match_names(["Soy Sauce", "Anchovy"])
    );
}

#[test]
fn test_explain_key_parts() {
    let matches = vec![
        MatchInput::new("Kombu", "kelp"),
        MatchInput::new("Soy Sauce", "condiment"),
    ];
    let parts = ExplanationService::cache_parts("Miso", &matches);

    assert_eq!(parts[0], "Miso");
    assert_eq!(parts[1], hash_match_names(["Kombu", "Soy Sauce"]));

    let key = ResponseCache::key(CacheNamespace::Explain, &parts);
    assert!(key.starts_with("explain:"));
}
