use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::vectordb::{
    IndexError, IndexMatch, IndexMetadata, IndexPoint, SimilarityIndex, WriteConsistency,
};

const MOCK_COLLECTION: &str = "mock";

/// In-memory [`SimilarityIndex`] doing brute-force cosine search.
#[derive(Default)]
pub struct MockIndex {
    collection: RwLock<Option<MockCollection>>,
    canned: RwLock<Option<Vec<IndexMatch>>>,
    fail: AtomicBool,
    queries: AtomicUsize,
    upserts: AtomicUsize,
}

#[derive(Default, Clone)]
struct MockCollection {
    vector_size: u64,
    points: BTreeMap<u64, MockStoredPoint>,
}

#[derive(Clone)]
struct MockStoredPoint {
    vector: Vec<f32>,
    metadata: IndexMetadata,
}

impl MockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// An index whose collection already exists with `vector_size` dimensions.
    pub fn with_collection(vector_size: u64) -> Self {
        let index = Self::default();
        *index.collection.write() = Some(MockCollection {
            vector_size,
            points: BTreeMap::new(),
        });
        index
    }

    /// Makes every subsequent call fail (or succeed again).
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Returns `matches` verbatim from every query, ignoring stored points.
    pub fn set_canned_results(&self, matches: Vec<IndexMatch>) {
        *self.canned.write() = Some(matches);
    }

    pub fn point_count(&self) -> Option<usize> {
        self.collection.read().as_ref().map(|c| c.points.len())
    }

    pub fn metadata(&self, id: u64) -> Option<IndexMetadata> {
        self.collection
            .read()
            .as_ref()
            .and_then(|c| c.points.get(&id))
            .map(|p| p.metadata.clone())
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    fn check_failing(&self) -> Result<(), IndexError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(IndexError::ConnectionFailed {
                url: "mock://index".to_string(),
                message: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SimilarityIndex for MockIndex {
    async fn ensure_collection(&self, vector_size: u64) -> Result<(), IndexError> {
        self.check_failing()?;

        self.collection.write().get_or_insert_with(|| MockCollection {
            vector_size,
            points: BTreeMap::new(),
        });

        Ok(())
    }

    async fn upsert(
        &self,
        points: Vec<IndexPoint>,
        _consistency: WriteConsistency,
    ) -> Result<(), IndexError> {
        self.check_failing()?;
        self.upserts.fetch_add(1, Ordering::SeqCst);

        let mut guard = self.collection.write();
        let coll = guard.as_mut().ok_or_else(|| IndexError::CollectionNotFound {
            collection: MOCK_COLLECTION.to_string(),
        })?;

        for point in points {
            if point.vector.len() as u64 != coll.vector_size {
                return Err(IndexError::InvalidDimension {
                    expected: coll.vector_size as usize,
                    actual: point.vector.len(),
                });
            }

            coll.points.insert(
                point.id,
                MockStoredPoint {
                    vector: point.vector,
                    metadata: point.metadata,
                },
            );
        }

        Ok(())
    }

    async fn query(&self, vector: Vec<f32>, top_k: u64) -> Result<Vec<IndexMatch>, IndexError> {
        self.check_failing()?;
        self.queries.fetch_add(1, Ordering::SeqCst);

        if let Some(canned) = self.canned.read().as_ref() {
            return Ok(canned.iter().take(top_k as usize).cloned().collect());
        }

        let guard = self.collection.read();
        let coll = guard.as_ref().ok_or_else(|| IndexError::CollectionNotFound {
            collection: MOCK_COLLECTION.to_string(),
        })?;

        let mut results: Vec<IndexMatch> = coll
            .points
            .iter()
            .map(|(&id, p)| {
                IndexMatch::new(
                    id.to_string(),
                    cosine_similarity(&vector, &p.vector),
                    p.metadata.clone(),
                )
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(top_k as usize);
        Ok(results)
    }

    async fn health_check(&self) -> Result<(), IndexError> {
        self.check_failing()
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
