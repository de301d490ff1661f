//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift. The
//! embedding dimension is fixed per deployment; modules that accept vectors
//! validate against it at their boundary with [`validate_vector_dim`].

/// Embedding dimension produced by the default sentence-embedding model.
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// Window size for internal batching of embedding requests.
pub const EMBED_BATCH_WINDOW: usize = 32;

/// Largest batch a single `embed_batch` call must accept.
pub const MAX_EMBED_BATCH: usize = 512;

/// Tolerance when asserting that a vector is L2-normalized.
pub const NORM_TOLERANCE: f32 = 1e-4;

/// Relevance/diversity weight for MMR reranking.
pub const DEFAULT_MMR_LAMBDA: f32 = 0.7;

/// Forced mutual similarity when two candidates share their first token.
pub const FIRST_TOKEN_SIM_FLOOR: f32 = 0.6;

/// Modifier filter size for the candidate generator.
pub const DEFAULT_K_MODIFIERS: usize = 20;

/// Noun filter size for the candidate generator.
pub const DEFAULT_K_NOUNS: usize = 30;

/// Share of each filter taken deterministically from the top of the ranking.
pub const TOP_SELECTION_SHARE: f32 = 0.7;

/// Number of titles returned by a recommendation.
pub const DEFAULT_RECOMMEND_K: usize = 3;

/// Size of the raw-similarity extract returned alongside the titles.
pub const DEFAULT_TOP_SIMILAR: usize = 5;

/// Candidate count requested from the index on the fallback path.
pub const DEFAULT_FALLBACK_CANDIDATES: usize = 50;

/// Minimum accepted statement length, in code points.
pub const MIN_STATEMENT_CHARS: usize = 10;

/// Maximum accepted statement length, in code points.
pub const MAX_STATEMENT_CHARS: usize = 50_000;

/// Error returned when a runtime vector dimension does not match the
/// configured dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimMismatch {
    pub expected: usize,
    pub actual: usize,
}

impl std::fmt::Display for DimMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "vector dimension mismatch: expected {}, got {}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for DimMismatch {}

/// Validates a runtime vector dimension against the expected dimension.
///
/// Use this at module boundaries to catch mismatches early instead of
/// producing silently wrong inner products deep in the pipeline.
pub fn validate_vector_dim(actual: usize, expected: usize) -> Result<(), DimMismatch> {
    if actual != expected {
        return Err(DimMismatch { expected, actual });
    }
    Ok(())
}

/// L2-normalizes a vector in place. A zero vector is left untouched.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

/// Inner product of two equal-length vectors.
///
/// Both operands are assumed L2-normalized, making this cosine similarity.
/// Mismatched lengths yield 0.0 rather than a partial product.
#[inline]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
