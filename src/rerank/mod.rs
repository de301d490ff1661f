//! Diversity reranking (Maximal Marginal Relevance).
//!
//! Greedy selection trading relevance against similarity to the already
//! selected set. Mutual similarity is Jaccard over whitespace tokens, with a
//! floor of 0.6 when two phrases share their first token: duplicated
//! modifiers dominate perceived repetition, so they are pushed apart harder
//! than the raw token overlap would.


use std::collections::HashSet;

use tracing::debug;

use crate::constants::{DEFAULT_MMR_LAMBDA, FIRST_TOKEN_SIM_FLOOR};
use crate::scoring::ScoredPhrase;

/// Configuration for [`MmrReranker`].
#[derive(Debug, Clone, Copy)]
pub struct MmrConfig {
    /// Relevance weight; `1 - lambda` weighs diversity. Default: `0.7`.
    pub lambda: f32,
}

impl Default for MmrConfig {
    fn default() -> Self {
        Self {
            lambda: DEFAULT_MMR_LAMBDA,
        }
    }
}

impl MmrConfig {
    /// Creates a config with an explicit lambda.
    pub fn with_lambda(lambda: f32) -> Self {
        Self { lambda }
    }
}

/// Greedy MMR reranker over scored phrases.
#[derive(Debug, Clone, Default)]
pub struct MmrReranker {
    config: MmrConfig,
}

impl MmrReranker {
    /// Creates a reranker with the default lambda.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reranker with an explicit config.
    pub fn with_config(config: MmrConfig) -> Self {
        Self { config }
    }

    /// Returns the active config.
    pub fn config(&self) -> &MmrConfig {
        &self.config
    }

    /// Selects `k` phrases maximizing `lambda * rel - (1 - lambda) * max_sim`.
    ///
    /// The output has length `min(k, |input|)`, contains no duplicates, and
    /// starts with the relevance argmax. Ties are broken by rank in the
    /// relevance-sorted input.
    pub fn rerank(&self, scored: &[ScoredPhrase], k: usize) -> Vec<ScoredPhrase> {
        if k == 0 || scored.is_empty() {
            return Vec::new();
        }

        // Relevance order defines the tie-break rank.
        let mut remaining: Vec<ScoredPhrase> = scored.to_vec();
        remaining.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut seen = HashSet::new();
        remaining.retain(|s| seen.insert(s.phrase.clone()));

        let k = k.min(remaining.len());
        let mut selected: Vec<ScoredPhrase> = Vec::with_capacity(k);
        selected.push(remaining.remove(0));

        while selected.len() < k && !remaining.is_empty() {
            let mut best_idx = 0;
            let mut best_score = f32::NEG_INFINITY;

            for (idx, candidate) in remaining.iter().enumerate() {
                let max_sim = selected
                    .iter()
                    .map(|s| token_similarity(&candidate.phrase, &s.phrase))
                    .fold(0.0f32, f32::max);

                let mmr =
                    self.config.lambda * candidate.score - (1.0 - self.config.lambda) * max_sim;

                // Strict comparison keeps the earlier (higher-ranked) item on ties.
                if mmr > best_score {
                    best_score = mmr;
                    best_idx = idx;
                }
            }

            selected.push(remaining.remove(best_idx));
        }

        debug!(input = scored.len(), selected = selected.len(), "MMR reranking complete");

        selected
    }
}

/// Mutual similarity between two phrases: Jaccard over whitespace tokens,
/// forced to at least 0.6 when the first tokens are identical.
pub fn token_similarity(a: &str, b: &str) -> f32 {
    if a == b {
        return 1.0;
    }

    let tokens_a: Vec<&str> = a.split_whitespace().collect();
    let tokens_b: Vec<&str> = b.split_whitespace().collect();

    let set_a: HashSet<&str> = tokens_a.iter().copied().collect();
    let set_b: HashSet<&str> = tokens_b.iter().copied().collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    let jaccard = if union > 0 {
        intersection as f32 / union as f32
    } else {
        0.0
    };

    match (tokens_a.first(), tokens_b.first()) {
        (Some(first_a), Some(first_b)) if first_a == first_b => {
            jaccard.max(FIRST_TOKEN_SIM_FLOOR)
        }
        _ => jaccard,
    }
}
