use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by vocabulary loading.
pub enum VocabError {
    /// An explicitly configured vocabulary file could not be read.
    #[error("failed to read vocabulary file '{path}': {source}")]
    ReadFailed {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A loaded list ended up empty after filtering.
    #[error("vocabulary list '{name}' is empty after filtering")]
    EmptyList {
        /// Which list ("modifiers" or "nouns").
        name: &'static str,
    },
}
