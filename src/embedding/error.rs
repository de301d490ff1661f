use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by embedding operations.
pub enum EmbeddingError {
    /// The service could not be reached, or kept failing with 5xx after the
    /// configured retries. Triggers the coordinator's fallback path.
    #[error("embedding service unavailable at '{url}': {message}")]
    Unavailable {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The service rejected the request (4xx). Never retried.
    #[error("embedding request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The response body could not be decoded or was not index-aligned.
    #[error("invalid embedding response: {reason}")]
    InvalidResponse {
        /// What went wrong.
        reason: String,
    },

    /// A returned vector did not match the configured dimension.
    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// The per-request deadline expired before the call completed.
    #[error("embedding call exceeded the request deadline")]
    DeadlineExceeded,

    /// The client could not be constructed.
    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig {
        /// What went wrong.
        reason: String,
    },
}

impl EmbeddingError {
    /// Returns `true` if this failure should divert the request onto the
    /// fallback path rather than surfacing.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            EmbeddingError::Unavailable { .. } | EmbeddingError::DeadlineExceeded
        )
    }
}
