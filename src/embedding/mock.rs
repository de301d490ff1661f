use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::TextEmbedder;
use super::error::EmbeddingError;
use crate::constants::l2_normalize;

/// Deterministic in-process embedder for tests.
///
/// Vectors are seeded from a hash of the input text, so equal texts always
/// map to equal unit vectors within and across runs. Failure switches let
/// tests drive the coordinator's fallback paths, and call counters let them
/// assert which operations ran.
pub struct MockEmbedder {
    dimension: usize,
    fail_single: AtomicBool,
    fail_batch: AtomicBool,
    single_calls: AtomicUsize,
    batch_calls: AtomicUsize,
}

impl MockEmbedder {
    /// Creates a mock producing vectors of `dimension`.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            fail_single: AtomicBool::new(false),
            fail_batch: AtomicBool::new(false),
            single_calls: AtomicUsize::new(0),
            batch_calls: AtomicUsize::new(0),
        }
    }

    /// Makes subsequent `embed` calls fail with `Unavailable`.
    pub fn fail_single(&self, fail: bool) {
        self.fail_single.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent `embed_batch` calls fail with `Unavailable`.
    pub fn fail_batch(&self, fail: bool) {
        self.fail_batch.store(fail, Ordering::SeqCst);
    }

    /// Number of `embed` calls made so far.
    pub fn single_calls(&self) -> usize {
        self.single_calls.load(Ordering::SeqCst)
    }

    /// Number of `embed_batch` calls made so far.
    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    /// Total calls of either kind.
    pub fn total_calls(&self) -> usize {
        self.single_calls() + self.batch_calls()
    }

    /// The deterministic unit vector this mock produces for `text`.
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut vector = Vec::with_capacity(self.dimension);
        let mut state = seed;

        for _ in 0..self.dimension {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            vector.push(value);
        }

        l2_normalize(&mut vector);
        vector
    }

    fn unavailable() -> EmbeddingError {
        EmbeddingError::Unavailable {
            url: "mock://embedder".to_string(),
            message: "mock failure".to_string(),
        }
    }
}

impl TextEmbedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        // Yield once to mirror the suspension point of a real network call.
        tokio::task::yield_now().await;
        if self.fail_single.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self.vector_for(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_batch.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn health_check(&self) -> Result<(), EmbeddingError> {
        if self.fail_single.load(Ordering::SeqCst) && self.fail_batch.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(())
    }
}
