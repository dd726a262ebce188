//! Fuzzy ingredient-name resolution.
//!
//! A free-text query is matched against the [`Catalog`] with four rules, tried in
//! order. Each rule scans the whole catalog before the next one is attempted, and
//! within a rule the first ingredient in catalog order wins:
//!
//! 1. **Exact**: case-insensitive equality on the trimmed query.
//! 2. **Whitespace-insensitive**: equality after removing all whitespace from both
//!    sides (`"Soysauce"` finds `"Soy Sauce"`).
//! 3. **Prefix**: the ingredient name starts with the query (`"Parmesan"` finds
//!    `"Parmesan (Parmigiano-Reggiano)"`).
//! 4. **Reverse prefix**: the query starts with the ingredient name
//!    (`"Miso paste"` finds `"Miso"`).
//!
//! Short queries can prefix-match several names; the first one in catalog order is
//! returned. That ordering is part of the contract, not an accident.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::catalog::{Catalog, Ingredient};

pub use crate::catalog::{build_embedding_text, format_compounds};

/// Which rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Exact,
    WhitespaceInsensitive,
    Prefix,
    ReversePrefix,
}

/// Resolves queries against a shared catalog.
#[derive(Debug, Clone)]
pub struct IngredientResolver {
    catalog: Arc<Catalog>,
    normalized: Vec<NormalizedName>,
}

#[derive(Debug, Clone)]
struct NormalizedName {
    lower: String,
    compact: String,
}

impl NormalizedName {
    fn new(name: &str) -> Self {
        let lower = name.trim().to_lowercase();
        let compact = strip_whitespace(&lower);
        Self { lower, compact }
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

impl IngredientResolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let normalized = catalog
            .iter()
            .map(|i| NormalizedName::new(&i.name))
            .collect();
        Self {
            catalog,
            normalized,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Returns the matching ingredient, or `None` when nothing matches.
    pub fn resolve(&self, query: &str) -> Option<&Ingredient> {
        self.resolve_with_rule(query).map(|(ingredient, _)| ingredient)
    }

    /// Like [`resolve`](Self::resolve), also reporting which rule matched.
    pub fn resolve_with_rule(&self, query: &str) -> Option<(&Ingredient, MatchRule)> {
        let needle = NormalizedName::new(query);
        if needle.lower.is_empty() {
            return None;
        }

        let rules: [(MatchRule, fn(&NormalizedName, &NormalizedName) -> bool); 4] = [
            (MatchRule::Exact, |name, q| name.lower == q.lower),
            (MatchRule::WhitespaceInsensitive, |name, q| {
                name.compact == q.compact
            }),
            (MatchRule::Prefix, |name, q| name.lower.starts_with(&q.lower)),
            (MatchRule::ReversePrefix, |name, q| {
                !name.lower.is_empty() && q.lower.starts_with(&name.lower)
            }),
        ];

        for (rule, matches) in rules {
            if let Some(pos) = self.normalized.iter().position(|n| matches(n, &needle)) {
                return Some((&self.catalog.ingredients()[pos], rule));
            }
        }

        None
    }

    /// Returns `true` if the query resolves to a catalog entry.
    pub fn exists(&self, query: &str) -> bool {
        self.resolve(query).is_some()
    }
}
