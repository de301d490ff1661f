//! Dynamic candidate generation.
//!
//! Builds the request's candidate pool from the vocabulary: each word pool is
//! ranked by cosine relevance to the query embedding (word vectors are
//! batch-embedded and cached across requests), a mixed 70/30 selection keeps
//! the ranking honest while leaving room for exploration, and the Cartesian
//! product of the two selections becomes the candidate set.

pub mod cache;


pub use cache::WordVectorCache;

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::debug;

use crate::constants::{DEFAULT_K_MODIFIERS, DEFAULT_K_NOUNS, TOP_SELECTION_SHARE, dot};
use crate::embedding::{EmbeddingError, TextEmbedder};
use crate::vocab::VocabStore;

/// A modifier + noun pair.
///
/// Two candidates are equal iff their renderings are equal; with disjoint
/// word pools that coincides with field equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// The modifier word.
    pub modifier: String,
    /// The noun word.
    pub noun: String,
}

impl Candidate {
    /// Creates a candidate pair.
    pub fn new(modifier: impl Into<String>, noun: impl Into<String>) -> Self {
        Self {
            modifier: modifier.into(),
            noun: noun.into(),
        }
    }

    /// Canonical single-string form: modifier, space, noun.
    pub fn rendering(&self) -> String {
        format!("{} {}", self.modifier, self.noun)
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.modifier, self.noun)
    }
}

#[derive(Debug, Error)]
/// Errors returned by candidate generation.
pub enum GeneratorError {
    /// Embedding the vocabulary failed.
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    /// A selection came out empty (both pools must contribute).
    #[error("candidate selection is empty")]
    EmptySelection,
}

/// Configuration for [`CandidateGenerator`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Modifiers kept after filtering. Default: `20`.
    pub k_modifiers: usize,
    /// Nouns kept after filtering. Default: `30`.
    pub k_nouns: usize,
    /// When `false`, the whole selection is the deterministic top-K
    /// (used for reproducible runs). Default: `true`.
    pub exploration: bool,
    /// Seed for the exploration sampler; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            k_modifiers: DEFAULT_K_MODIFIERS,
            k_nouns: DEFAULT_K_NOUNS,
            exploration: true,
            seed: None,
        }
    }
}

/// Generates the candidate pool for a query embedding.
pub struct CandidateGenerator<E> {
    embedder: Arc<E>,
    vocab: Arc<VocabStore>,
    cache: WordVectorCache,
    config: GeneratorConfig,
}

impl<E: TextEmbedder> CandidateGenerator<E> {
    /// Creates a generator over `vocab` backed by `embedder`.
    pub fn new(embedder: Arc<E>, vocab: Arc<VocabStore>, config: GeneratorConfig) -> Self {
        Self {
            embedder,
            vocab,
            cache: WordVectorCache::new(),
            config,
        }
    }

    /// Returns the active config.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Number of vocabulary words with cached vectors.
    pub fn cached_words(&self) -> usize {
        self.cache.len()
    }

    /// Produces the candidate pool for `query`.
    ///
    /// Output size is `min(k_modifiers, |A|) * min(k_nouns, |N|)` with no
    /// duplicate renderings.
    pub async fn generate(&self, query: &[f32]) -> Result<Vec<Candidate>, GeneratorError> {
        let modifiers = self
            .select_words(self.vocab.modifiers(), self.config.k_modifiers, query)
            .await?;
        let nouns = self
            .select_words(self.vocab.nouns(), self.config.k_nouns, query)
            .await?;

        if modifiers.is_empty() || nouns.is_empty() {
            return Err(GeneratorError::EmptySelection);
        }

        let mut candidates = Vec::with_capacity(modifiers.len() * nouns.len());
        for modifier in &modifiers {
            for noun in &nouns {
                candidates.push(Candidate::new(modifier.clone(), noun.clone()));
            }
        }

        debug!(
            modifiers = modifiers.len(),
            nouns = nouns.len(),
            candidates = candidates.len(),
            "Candidate pool generated"
        );

        Ok(candidates)
    }

    /// Ranks `words` by cosine relevance to `query` and applies the mixed
    /// top-K selection.
    async fn select_words(
        &self,
        words: &[String],
        k: usize,
        query: &[f32],
    ) -> Result<Vec<String>, GeneratorError> {
        let ranked = self.rank_words(words, query).await?;
        Ok(self.mixed_select(ranked, k))
    }

    /// Scores every word against the query, using cached vectors where
    /// available and one batched embed for the rest. Result is sorted by
    /// score descending, original order breaking ties.
    async fn rank_words(
        &self,
        words: &[String],
        query: &[f32],
    ) -> Result<Vec<(String, f32)>, GeneratorError> {
        let (hits, misses) = self.cache.partition(words);

        let mut vectors: std::collections::HashMap<&str, Vec<f32>> =
            hits.into_iter().collect();

        if !misses.is_empty() {
            let miss_texts: Vec<String> = misses.iter().map(|w| w.to_string()).collect();
            let embedded = self.embedder.embed_batch(&miss_texts).await?;

            self.cache.insert_all(
                miss_texts
                    .iter()
                    .cloned()
                    .zip(embedded.iter().cloned()),
            );

            for (word, vector) in misses.into_iter().zip(embedded.into_iter()) {
                vectors.insert(word, vector);
            }
        }

        let mut ranked: Vec<(String, f32)> = words
            .iter()
            .filter_map(|word| {
                vectors
                    .get(word.as_str())
                    .map(|v| (word.clone(), dot(query, v)))
            })
            .collect();

        // Stable sort keeps vocabulary order as the tie-break.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(ranked)
    }

    /// Mixed top-K selection: the top 70% of K is taken deterministically
    /// from the head of the ranking, the remaining 30% is sampled uniformly
    /// from the tail beyond position K. A tail too short to fill the quota
    /// is topped up from the skipped middle band, in score order.
    fn mixed_select(&self, ranked: Vec<(String, f32)>, k: usize) -> Vec<String> {
        let k = k.min(ranked.len());
        if k == 0 {
            return Vec::new();
        }

        if !self.config.exploration {
            return ranked.into_iter().take(k).map(|(w, _)| w).collect();
        }

        let top_count = ((k as f32) * TOP_SELECTION_SHARE).floor() as usize;
        let mut selected: Vec<String> = ranked[..top_count]
            .iter()
            .map(|(w, _)| w.clone())
            .collect();

        let remainder = k - top_count;
        if remainder > 0 {
            let mut rng = match self.config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let tail = &ranked[k..];
            let mut sampled: Vec<String> = tail
                .choose_multiple(&mut rng, remainder)
                .map(|(w, _)| w.clone())
                .collect();

            if sampled.len() < remainder {
                let missing = remainder - sampled.len();
                sampled.extend(
                    ranked[top_count..k]
                        .iter()
                        .take(missing)
                        .map(|(w, _)| w.clone()),
                );
            }

            selected.extend(sampled);
        }

        selected
    }
}
