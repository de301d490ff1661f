use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
/// Errors surfaced by the recommendation coordinator.
pub enum RecommendError {
    /// Unknown resume identifier. Surfaced before any embedding work.
    #[error("resume not found: {id}")]
    ResumeNotFound {
        /// The unknown identifier.
        id: Uuid,
    },

    /// Stored statement is below the minimum length (defense in depth; intake
    /// enforces the same bound).
    #[error("statement too short: {length} code points (minimum {min})")]
    TextTooShort {
        /// Observed length in code points.
        length: usize,
        /// Configured minimum.
        min: usize,
    },

    /// Both the dynamic path and the index fallback failed.
    #[error("recommendation unavailable: {message}")]
    Unavailable {
        /// What failed last.
        message: String,
    },
}
