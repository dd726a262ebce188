//! Index population from the catalog.
//!
//! Seeding runs in fixed-size batches addressed by catalog offset, so a caller can
//! resume from `next` after a partial run. Re-seeding is idempotent: point ids are
//! ingredient ids and upserts replace.

pub mod error;


pub use error::SeedError;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::catalog::{Catalog, build_embedding_text};
use crate::constants::DEFAULT_SEED_BATCH_SIZE;
use crate::embedding::Embedder;
use crate::vectordb::{IndexMetadata, IndexPoint, SimilarityIndex, WriteConsistency};

/// Result of one seeding batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    pub success: bool,
    pub seeded: usize,
    pub start: usize,
    /// Offset of the next batch, or `None` when the catalog is exhausted.
    pub next: Option<usize>,
    pub total: usize,
    /// `"<done>/<total>"`.
    pub progress: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct IndexSeeder {
    catalog: Arc<Catalog>,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn SimilarityIndex>,
    batch_size: usize,
}

impl IndexSeeder {
    pub fn new(
        catalog: Arc<Catalog>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn SimilarityIndex>,
    ) -> Self {
        Self {
            catalog,
            embedder,
            index,
            batch_size: DEFAULT_SEED_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Embeds and upserts the batch starting at catalog offset `start`.
    #[instrument(skip(self), fields(batch_size = self.batch_size))]
    pub async fn seed_batch(&self, start: usize) -> Result<SeedReport, SeedError> {
        let total = self.catalog.len();
        let batch = self
            .catalog
            .ingredients()
            .get(start..)
            .map(|rest| &rest[..rest.len().min(self.batch_size)])
            .unwrap_or_default();

        if batch.is_empty() {
            return Ok(SeedReport {
                success: true,
                seeded: 0,
                start,
                next: None,
                total,
                progress: format!("{}/{}", total, total),
                message: Some("No more ingredients to seed".to_string()),
            });
        }

        self.index
            .ensure_collection(self.embedder.embedding_dim() as u64)
            .await?;

        let texts: Vec<String> = batch.iter().map(build_embedding_text).collect();
        let vectors = self.embedder.embed_batch(&texts).await?;
        if vectors.len() != batch.len() {
            return Err(SeedError::VectorCountMismatch {
                expected: batch.len(),
                actual: vectors.len(),
            });
        }

        let points: Vec<IndexPoint> = batch
            .iter()
            .zip(vectors)
            .map(|(ingredient, vector)| {
                IndexPoint::new(
                    ingredient.id as u64,
                    vector,
                    IndexMetadata::from_ingredient(ingredient),
                )
            })
            .collect();

        let seeded = points.len();
        self.index.upsert(points, WriteConsistency::Strong).await?;

        let next_start = start + self.batch_size;
        let next = (next_start < total).then_some(next_start);
        info!(start, seeded, total, "seeded batch");

        Ok(SeedReport {
            success: true,
            seeded,
            start,
            next,
            total,
            progress: format!("{}/{}", next_start.min(total), total),
            message: None,
        })
    }

    /// Seeds every batch in order. Returns the number of points written.
    pub async fn seed_all(&self) -> Result<usize, SeedError> {
        let mut start = 0;
        let mut seeded = 0;

        loop {
            let report = self.seed_batch(start).await?;
            seeded += report.seeded;
            match report.next {
                Some(next) => start = next,
                None => break,
            }
        }

        info!(seeded, "seeding complete");
        Ok(seeded)
    }
}

impl std::fmt::Debug for IndexSeeder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexSeeder")
            .field("catalog_len", &self.catalog.len())
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}
