use super::*;
use crate::catalog::{Catalog, Ingredient};

fn test_catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::new(vec![
            Ingredient::new(1, "Miso", "fermented soybean paste"),
            Ingredient::new(2, "Parmesan cheese", "aged hard cheese"),
            Ingredient::new(3, "Parmesan rind", "the rind"),
            Ingredient::new(4, "Soy Sauce", "fermented condiment"),
            Ingredient::new(5, "Black Garlic", "aged garlic"),
            Ingredient::new(6, "Mi", "two letters"),
        ])
        .unwrap(),
    )
}

fn resolver() -> IngredientResolver {
    IngredientResolver::new(test_catalog())
}

#[test]
fn test_every_catalog_name_resolves_to_itself() {
    let resolver = IngredientResolver::new(Arc::new(Catalog::builtin().unwrap()));

    for ingredient in resolver.catalog().iter() {
        let found = resolver.resolve(&ingredient.name).expect("name must resolve");
        assert_eq!(found.id, ingredient.id);

        let upper = resolver.resolve(&ingredient.name.to_uppercase()).unwrap();
        assert_eq!(upper.id, ingredient.id);

        let lower = resolver.resolve(&ingredient.name.to_lowercase()).unwrap();
        assert_eq!(lower.id, ingredient.id);
    }
}

#[test]
fn test_empty_query_not_found() {
    let resolver = resolver();
    assert!(resolver.resolve("").is_none());
    assert!(resolver.resolve("   ").is_none());
    assert!(resolver.resolve("\t\n").is_none());
}

#[test]
fn test_exact_match_trimmed_case_insensitive() {
    let resolver = resolver();
    let (found, rule) = resolver.resolve_with_rule("  miso ").unwrap();
    assert_eq!(found.name, "Miso");
    assert_eq!(rule, MatchRule::Exact);
}

#[test]
fn test_exact_beats_prefix() {
    // "Mi" is an exact match for id 6 even though "Miso" (id 1) comes first and
    // would win the prefix rule.
    let resolver = resolver();
    let (found, rule) = resolver.resolve_with_rule("mi").unwrap();
    assert_eq!(found.id, 6);
    assert_eq!(rule, MatchRule::Exact);
}

#[test]
fn test_whitespace_insensitive_match() {
    let resolver = resolver();

    let (found, rule) = resolver.resolve_with_rule("Parmesancheese").unwrap();
    assert_eq!(found.name, "Parmesan cheese");
    assert_eq!(rule, MatchRule::WhitespaceInsensitive);

    let (found, _) = resolver.resolve_with_rule("soy   sauce").unwrap();
    assert_eq!(found.name, "Soy Sauce");
}

#[test]
fn test_prefix_match_first_in_catalog_order() {
    let resolver = resolver();
    let (found, rule) = resolver.resolve_with_rule("parmesan").unwrap();
    assert_eq!(found.name, "Parmesan cheese");
    assert_eq!(rule, MatchRule::Prefix);
}

#[test]
fn test_prefix_match_builtin_parmesan() {
    let resolver = IngredientResolver::new(Arc::new(Catalog::builtin().unwrap()));
    let found = resolver.resolve("parmesan").unwrap();
    assert!(found.name.to_lowercase().starts_with("parmesan"));
    assert_eq!(found.id, 2);
}

#[test]
fn test_reverse_prefix_match() {
    let resolver = resolver();
    let (found, rule) = resolver
        .resolve_with_rule("Parmesan cheese aged")
        .unwrap();
    assert_eq!(found.name, "Parmesan cheese");
    assert_eq!(rule, MatchRule::ReversePrefix);
}

#[test]
fn test_reverse_prefix_first_in_catalog_order() {
    // Both "Miso" and "Mi" are prefixes of the query; "Miso" is earlier in the catalog.
    let resolver = resolver();
    let (found, rule) = resolver.resolve_with_rule("miso soup").unwrap();
    assert_eq!(found.name, "Miso");
    assert_eq!(rule, MatchRule::ReversePrefix);
}

#[test]
fn test_unknown_query_not_found() {
    let resolver = resolver();
    assert!(resolver.resolve("NotAnIngredientXYZ").is_none());
    assert!(!resolver.exists("NotAnIngredientXYZ"));
    assert!(resolver.exists("miso"));
}

#[test]
fn test_resolve_is_pure() {
    let resolver = resolver();
    let first = resolver.resolve("black").map(|i| i.id);
    let second = resolver.resolve("black").map(|i| i.id);
    assert_eq!(first, second);
    assert_eq!(first, Some(5));
}
