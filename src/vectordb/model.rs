use std::collections::HashMap;

use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{ScoredPoint, Value};
use serde::{Deserialize, Serialize};

use crate::catalog::{Ingredient, format_compounds};

const FIELD_NAME: &str = "name";
const FIELD_DESCRIPTION: &str = "description";
const FIELD_COMPOUNDS: &str = "compounds";

/// Per-point metadata stored alongside each vector.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub name: String,
    pub description: String,
    /// Comma-joined, capped compound list (see [`format_compounds`]).
    pub compounds: String,
}

impl IndexMetadata {
    pub fn from_ingredient(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            description: ingredient.description.clone(),
            compounds: format_compounds(ingredient),
        }
    }

    pub(crate) fn into_payload(self) -> HashMap<String, Value> {
        let mut payload: HashMap<String, Value> = HashMap::new();
        payload.insert(FIELD_NAME.to_string(), self.name.into());
        payload.insert(FIELD_DESCRIPTION.to_string(), self.description.into());
        payload.insert(FIELD_COMPOUNDS.to_string(), self.compounds.into());
        payload
    }

    pub(crate) fn from_payload(payload: &HashMap<String, Value>) -> Self {
        let field = |key: &str| {
            payload
                .get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or_default()
        };

        Self {
            name: field(FIELD_NAME),
            description: field(FIELD_DESCRIPTION),
            compounds: field(FIELD_COMPOUNDS),
        }
    }
}

/// A vector to write into the index.
#[derive(Debug, Clone)]
pub struct IndexPoint {
    pub id: u64,
    pub vector: Vec<f32>,
    pub metadata: IndexMetadata,
}

impl IndexPoint {
    pub fn new(id: u64, vector: Vec<f32>, metadata: IndexMetadata) -> Self {
        Self {
            id,
            vector,
            metadata,
        }
    }
}

/// A scored neighbor returned by a query, highest score first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMatch {
    pub id: String,
    pub score: f32,
    pub metadata: IndexMetadata,
}

impl IndexMatch {
    pub fn new(id: impl Into<String>, score: f32, metadata: IndexMetadata) -> Self {
        Self {
            id: id.into(),
            score,
            metadata,
        }
    }

    pub fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        let id = match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Num(n)) => n.to_string(),
            Some(PointIdOptions::Uuid(u)) => u,
            None => return None,
        };

        Some(IndexMatch {
            id,
            score: point.score,
            metadata: IndexMetadata::from_payload(&point.payload),
        })
    }
}
