use std::sync::Arc;

use crate::embedding::TextEmbedder;
use crate::index::VectorIndex;
use crate::recommend::Recommender;
use crate::resume::{MemoryResumeStore, ResumeStore};

/// Shared state for the HTTP handlers.
pub struct HandlerState<E, V, R> {
    /// Recommendation coordinator.
    pub recommender: Arc<Recommender<E, V, R>>,
    /// Intake store (also consulted by `/ready`).
    pub resumes: Arc<MemoryResumeStore>,
    /// Embedder handle for readiness checks.
    pub embedder: Arc<E>,
    /// Index handle for readiness checks.
    pub index: Arc<V>,
}

impl<E, V, R> HandlerState<E, V, R>
where
    E: TextEmbedder,
    V: VectorIndex,
    R: ResumeStore,
{
    /// Bundles the shared components.
    pub fn new(
        recommender: Arc<Recommender<E, V, R>>,
        resumes: Arc<MemoryResumeStore>,
        embedder: Arc<E>,
        index: Arc<V>,
    ) -> Self {
        Self {
            recommender,
            resumes,
            embedder,
            index,
        }
    }
}

// Manual impl: `#[derive(Clone)]` would demand Clone on the type parameters,
// but only the Arcs are cloned.
impl<E, V, R> Clone for HandlerState<E, V, R> {
    fn clone(&self) -> Self {
        Self {
            recommender: self.recommender.clone(),
            resumes: self.resumes.clone(),
            embedder: self.embedder.clone(),
            index: self.index.clone(),
        }
    }
}
