//! Vocabulary store: the modifier and noun word pools.
//!
//! Both lists are loaded once at startup and immutable afterwards, so the
//! read path needs no synchronization. Loading tries a short list of
//! candidate paths in order (first readable file wins) and falls back to the
//! compiled-in pools in [`defaults`], keeping tests and smoke runs operable
//! with no data files on disk.

pub mod defaults;
pub mod error;


pub use error::VocabError;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Candidate paths tried for the modifier list, in order.
pub const MODIFIER_PATHS: &[&str] = &["./data/modifiers.txt", "../data/modifiers.txt"];

/// Candidate paths tried for the noun list, in order.
pub const NOUN_PATHS: &[&str] = &["./data/nouns.txt", "../data/nouns.txt"];

/// Immutable modifier and noun pools.
#[derive(Debug, Clone)]
pub struct VocabStore {
    modifiers: Vec<String>,
    nouns: Vec<String>,
}

impl VocabStore {
    /// Loads both lists from the default path lists, with optional per-list
    /// overrides. An override that cannot be read is an error; a missing
    /// default path just falls through to the compiled-in pool.
    pub fn load(
        modifier_override: Option<&Path>,
        noun_override: Option<&Path>,
    ) -> Result<Self, VocabError> {
        let modifiers = Self::load_list(
            "modifiers",
            modifier_override,
            MODIFIER_PATHS,
            defaults::DEFAULT_MODIFIERS,
        )?;
        let nouns = Self::load_list("nouns", noun_override, NOUN_PATHS, defaults::DEFAULT_NOUNS)?;

        info!(
            modifiers = modifiers.len(),
            nouns = nouns.len(),
            "Vocabulary loaded"
        );

        Ok(Self { modifiers, nouns })
    }

    /// Builds a store directly from word lists (used by tests and tools).
    pub fn from_words<M, N>(modifiers: M, nouns: N) -> Result<Self, VocabError>
    where
        M: IntoIterator,
        M::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        let modifiers = dedup_words(modifiers.into_iter().map(Into::into));
        let nouns = dedup_words(nouns.into_iter().map(Into::into));

        if modifiers.is_empty() {
            return Err(VocabError::EmptyList { name: "modifiers" });
        }
        if nouns.is_empty() {
            return Err(VocabError::EmptyList { name: "nouns" });
        }

        Ok(Self { modifiers, nouns })
    }

    /// The modifier pool.
    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    /// The noun pool.
    pub fn nouns(&self) -> &[String] {
        &self.nouns
    }

    /// Total number of distinct words across both pools.
    pub fn word_count(&self) -> usize {
        self.modifiers.len() + self.nouns.len()
    }

    fn load_list(
        name: &'static str,
        override_path: Option<&Path>,
        candidate_paths: &[&str],
        fallback: &[&str],
    ) -> Result<Vec<String>, VocabError> {
        if let Some(path) = override_path {
            let content = std::fs::read_to_string(path).map_err(|e| VocabError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
            let words = parse_word_list(&content);
            if words.is_empty() {
                return Err(VocabError::EmptyList { name });
            }
            info!(list = name, path = %path.display(), words = words.len(), "Word pool loaded");
            return Ok(words);
        }

        for candidate in candidate_paths {
            let path = PathBuf::from(candidate);
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    let words = parse_word_list(&content);
                    if !words.is_empty() {
                        info!(list = name, path = %path.display(), words = words.len(), "Word pool loaded");
                        return Ok(words);
                    }
                }
                Err(_) => continue,
            }
        }

        warn!(list = name, "No readable word pool file, using built-in defaults");
        Ok(fallback.iter().map(|w| w.to_string()).collect())
    }
}

/// Parses a vocabulary file: one entry per line, trimmed; blank lines and
/// lines whose first non-space character is `#` are dropped; duplicates are
/// removed preserving first occurrence.
pub fn parse_word_list(content: &str) -> Vec<String> {
    dedup_words(
        content
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty() && !line.starts_with('#')),
    )
}

fn dedup_words(words: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .filter(|w| !w.is_empty())
        .filter(|w| seen.insert(w.clone()))
        .collect()
}
