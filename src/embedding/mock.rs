use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{Embedder, EmbeddingError, StubEmbedder};

/// Stub-backed embedder that records every text it is asked to embed and can be
/// switched into a failing state.
#[derive(Debug, Default)]
pub struct MockEmbedder {
    inner: StubEmbedder,
    calls: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let embedder = Self::default();
        embedder.set_failing(true);
        embedder
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Texts embedded so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.lock().push(text.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(EmbeddingError::RequestFailed {
                reason: "mock embedder offline".to_string(),
            });
        }
        Ok(self.inner.vector_for(text))
    }

    fn embedding_dim(&self) -> usize {
        self.inner.embedding_dim()
    }

    fn is_stub(&self) -> bool {
        true
    }
}
