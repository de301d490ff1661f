use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by phrase-index operations.
pub enum IndexError {
    /// Vector dimension mismatch on insert or search.
    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// The index has been closed; no further operations are accepted.
    #[error("index is closed")]
    Closed,

    /// The snapshot directory could not be created.
    #[error("failed to create index directory '{path}': {source}")]
    CreateDirFailed {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the snapshot failed.
    #[error("failed to persist index snapshot '{path}': {message}")]
    PersistFailed {
        /// Snapshot path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// The index directory is not accessible.
    #[error("index directory not accessible: {path}")]
    DirNotAccessible {
        /// Directory path.
        path: PathBuf,
    },
}
