//! Candidate scoring against the query embedding.
//!
//! One batched embed over the candidate renderings, one inner product each.
//! Output is 1:1 and order-preserving with the input.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::debug;

use crate::constants::dot;
use crate::embedding::{EmbeddingError, TextEmbedder};
use crate::generator::Candidate;

/// A phrase with its relevance to the query, in `[-1, 1]`.
///
/// Used transiently during a request; both the dynamic and the fallback path
/// produce this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPhrase {
    /// The rendered phrase.
    pub phrase: String,
    /// Cosine similarity to the query embedding.
    pub score: f32,
}

impl ScoredPhrase {
    /// Creates a scored phrase.
    pub fn new(phrase: impl Into<String>, score: f32) -> Self {
        Self {
            phrase: phrase.into(),
            score,
        }
    }
}

/// Scores candidate renderings against a query embedding.
pub struct CandidateScorer<E> {
    embedder: Arc<E>,
}

impl<E: TextEmbedder> CandidateScorer<E> {
    /// Creates a scorer backed by `embedder`.
    pub fn new(embedder: Arc<E>) -> Self {
        Self { embedder }
    }

    /// Scores `candidates` against `query`.
    ///
    /// The result has the same length and order as the input.
    pub async fn score(
        &self,
        query: &[f32],
        candidates: &[Candidate],
    ) -> Result<Vec<ScoredPhrase>, EmbeddingError> {
        if candidates.is_empty() {
            return Ok(vec![]);
        }

        let renderings: Vec<String> = candidates.iter().map(|c| c.rendering()).collect();
        let vectors = self.embedder.embed_batch(&renderings).await?;

        if vectors.len() != renderings.len() {
            return Err(EmbeddingError::InvalidResponse {
                reason: format!(
                    "expected {} vectors, got {}",
                    renderings.len(),
                    vectors.len()
                ),
            });
        }

        let scored: Vec<ScoredPhrase> = renderings
            .into_iter()
            .zip(vectors.iter())
            .map(|(phrase, vector)| ScoredPhrase::new(phrase, dot(query, vector)))
            .collect();

        debug!(candidates = scored.len(), "Candidates scored");

        Ok(scored)
    }
}

/// Returns the `n` highest-scored phrases, descending, input order breaking
/// ties. The input is left untouched.
pub fn top_n(scored: &[ScoredPhrase], n: usize) -> Vec<ScoredPhrase> {
    let mut sorted: Vec<ScoredPhrase> = scored.to_vec();
    sorted.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(n);
    sorted
}
