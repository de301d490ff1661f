use std::collections::HashMap;

use parking_lot::RwLock;

/// Shared per-word embedding cache.
///
/// Read-mostly: after the first request warms it, lookups are lock-read only.
/// Size is bounded by the vocabulary (|modifiers| + |nouns|), so no eviction
/// is needed.
#[derive(Default)]
pub struct WordVectorCache {
    vectors: RwLock<HashMap<String, Vec<f32>>>,
}

impl WordVectorCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `words` into cached (word, vector) pairs and uncached words.
    pub fn partition<'a>(&self, words: &'a [String]) -> (Vec<(&'a str, Vec<f32>)>, Vec<&'a str>) {
        let vectors = self.vectors.read();
        let mut hits = Vec::new();
        let mut misses = Vec::new();

        for word in words {
            match vectors.get(word.as_str()) {
                Some(v) => hits.push((word.as_str(), v.clone())),
                None => misses.push(word.as_str()),
            }
        }

        (hits, misses)
    }

    /// Inserts freshly embedded words.
    pub fn insert_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (String, Vec<f32>)>,
    {
        let mut vectors = self.vectors.write();
        for (word, vector) in entries {
            vectors.insert(word, vector);
        }
    }

    /// Number of cached words.
    pub fn len(&self) -> usize {
        self.vectors.read().len()
    }

    /// Returns `true` if nothing is cached yet.
    pub fn is_empty(&self) -> bool {
        self.vectors.read().is_empty()
    }
}
