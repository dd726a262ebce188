//! Immutable ingredient catalog.
//!
//! Loaded once at startup, either from the data set compiled into the crate
//! ([`Catalog::builtin`]) or from a JSON file ([`Catalog::from_path`]).

pub mod error;


pub use error::CatalogError;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_EMBEDDING_COMPOUNDS;

const BUILTIN_CATALOG: &str = include_str!("ingredients.json");

/// A known ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Stable 1-based identifier; also used as the index point id.
    pub id: u32,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub compounds: Vec<String>,
}

impl Ingredient {
    pub fn new(id: u32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            compounds: Vec::new(),
        }
    }

    pub fn with_compounds<I, S>(mut self, compounds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compounds = compounds.into_iter().map(Into::into).collect();
        self
    }
}

/// Comma-joined compounds, capped at [`MAX_EMBEDDING_COMPOUNDS`].
///
/// This is the string stored in index metadata and returned as `SearchMatch::compounds`.
pub fn format_compounds(ingredient: &Ingredient) -> String {
    ingredient
        .compounds
        .iter()
        .take(MAX_EMBEDDING_COMPOUNDS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Text embedded for an ingredient: `"<name>: <c1>, <c2>, ..."` or the bare name.
///
/// Must stay byte-identical between index population and query time.
pub fn build_embedding_text(ingredient: &Ingredient) -> String {
    let compounds = format_compounds(ingredient);
    if compounds.is_empty() {
        ingredient.name.clone()
    } else {
        format!("{}: {}", ingredient.name, compounds)
    }
}

/// Read-only, ordered list of ingredients. Order is the resolver's tie-break.
#[derive(Debug, Clone)]
pub struct Catalog {
    ingredients: Vec<Ingredient>,
}

impl Catalog {
    /// Builds a catalog, checking that ids are non-zero and unique.
    pub fn new(ingredients: Vec<Ingredient>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(ingredients.len());
        for ingredient in &ingredients {
            if ingredient.id == 0 {
                return Err(CatalogError::InvalidId {
                    name: ingredient.name.clone(),
                });
            }
            if !seen.insert(ingredient.id) {
                return Err(CatalogError::DuplicateId { id: ingredient.id });
            }
        }

        Ok(Self { ingredients })
    }

    /// Parses the data set compiled into the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parses a JSON array of ingredients.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let ingredients: Vec<Ingredient> = serde_json::from_str(json)?;
        Self::new(ingredients)
    }

    /// Reads and parses a JSON catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&raw)
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ingredient> {
        self.ingredients.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}
