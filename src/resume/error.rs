use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
/// Errors returned by the resume store.
pub enum ResumeError {
    /// No resume with this identifier exists.
    #[error("resume not found: {id}")]
    NotFound {
        /// The unknown identifier.
        id: Uuid,
    },

    /// Statement below the minimum length.
    #[error("statement too short: {length} code points (minimum {min})")]
    TextTooShort {
        /// Observed length in code points.
        length: usize,
        /// Configured minimum.
        min: usize,
    },

    /// Statement above the maximum length.
    #[error("statement too long: {length} code points (maximum {max})")]
    TextTooLong {
        /// Observed length in code points.
        length: usize,
        /// Configured maximum.
        max: usize,
    },
}
