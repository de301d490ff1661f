//! Embedding backend integration.
//!
//! The pipeline consumes embeddings through the [`TextEmbedder`] trait.
//! [`HttpEmbedder`] talks to the remote embedding service; a deterministic
//! [`MockEmbedder`] is available behind the `mock` feature for tests.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::{EmbedderConfig, HttpEmbedder};
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;

use std::future::Future;

/// Text-to-vector interface used by the recommendation pipeline.
///
/// Every returned vector has the embedder's [`dimension`](TextEmbedder::dimension)
/// and unit L2 norm. Embedding is deterministic for a given model version.
pub trait TextEmbedder: Send + Sync {
    /// Embeds a single text.
    fn embed(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;

    /// Embeds a batch of texts, order-preserving and 1:1 with the input.
    ///
    /// Equivalent in result to per-text [`embed`](TextEmbedder::embed);
    /// implementations window large batches internally.
    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send;

    /// Dimension of every vector this embedder produces.
    fn dimension(&self) -> usize;

    /// Checks that the backing service is ready.
    fn health_check(&self) -> impl Future<Output = Result<(), EmbeddingError>> + Send;
}
