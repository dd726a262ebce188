use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use tracing::debug;

use super::WriteConsistency;
use super::error::IndexError;
use super::model::{IndexMatch, IndexPoint};

/// Nearest-neighbour index over ingredient embeddings.
///
/// Implementations are bound to a single collection at construction time.
#[async_trait]
pub trait SimilarityIndex: Send + Sync {
    /// Creates the collection if it does not exist yet.
    async fn ensure_collection(&self, vector_size: u64) -> Result<(), IndexError>;

    /// Inserts or replaces points by id.
    async fn upsert(
        &self,
        points: Vec<IndexPoint>,
        consistency: WriteConsistency,
    ) -> Result<(), IndexError>;

    /// Returns up to `top_k` neighbours, highest score first.
    async fn query(&self, vector: Vec<f32>, top_k: u64) -> Result<Vec<IndexMatch>, IndexError>;

    /// Checks that the backend is reachable.
    async fn health_check(&self) -> Result<(), IndexError> {
        Ok(())
    }
}

#[derive(Clone)]
/// Qdrant-backed [`SimilarityIndex`].
pub struct QdrantIndex {
    client: Qdrant,
    url: String,
    collection: String,
}

impl QdrantIndex {
    /// Creates a client for `url` bound to `collection`.
    pub fn new(url: &str, collection: impl Into<String>) -> Result<Self, IndexError> {
        let client =
            Qdrant::from_url(url)
                .build()
                .map_err(|e| IndexError::ConnectionFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self {
            client,
            url: url.to_string(),
            collection: collection.into(),
        })
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    async fn create_collection(&self, vector_size: u64) -> Result<(), IndexError> {
        let vectors_config = VectorParamsBuilder::new(vector_size, Distance::Cosine);

        self.client
            .create_collection(
                CreateCollectionBuilder::new(self.collection.as_str())
                    .vectors_config(vectors_config),
            )
            .await
            .map_err(|e| IndexError::CreateCollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}

#[async_trait]
impl SimilarityIndex for QdrantIndex {
    async fn ensure_collection(&self, vector_size: u64) -> Result<(), IndexError> {
        let exists = self
            .client
            .collection_exists(self.collection.as_str())
            .await
            .map_err(|e| IndexError::CreateCollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        if !exists {
            debug!(collection = %self.collection, vector_size, "creating collection");
            self.create_collection(vector_size).await?;
        }

        Ok(())
    }

    async fn upsert(
        &self,
        points: Vec<IndexPoint>,
        consistency: WriteConsistency,
    ) -> Result<(), IndexError> {
        if points.is_empty() {
            return Ok(());
        }

        let qdrant_points: Vec<PointStruct> = points
            .into_iter()
            .map(|p| PointStruct::new(p.id, p.vector, p.metadata.into_payload()))
            .collect();

        self.client
            .upsert_points(
                UpsertPointsBuilder::new(self.collection.as_str(), qdrant_points)
                    .wait(consistency.into()),
            )
            .await
            .map_err(|e| IndexError::UpsertFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn query(&self, vector: Vec<f32>, top_k: u64) -> Result<Vec<IndexMatch>, IndexError> {
        let search_builder =
            SearchPointsBuilder::new(self.collection.as_str(), vector, top_k).with_payload(true);

        let response = self
            .client
            .search_points(search_builder)
            .await
            .map_err(|e| IndexError::QueryFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(response
            .result
            .into_iter()
            .filter_map(IndexMatch::from_scored_point)
            .collect())
    }

    async fn health_check(&self) -> Result<(), IndexError> {
        self.client
            .health_check()
            .await
            .map_err(|e| IndexError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}
