use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Attribute key under which a record's human-readable phrase is stored.
pub const PHRASE_ATTRIBUTE: &str = "phrase";

/// A stored phrase embedding with its attributes.
///
/// Identifiers are unique within the index. The phrase text travels in the
/// attribute map under [`PHRASE_ATTRIBUTE`]; a record without it falls back
/// to its identifier when surfaced in search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseRecord {
    /// Unique identifier.
    pub id: String,
    /// Embedding vector (stored L2-normalized).
    pub vector: Vec<f32>,
    /// Opaque attributes; carries the phrase under `"phrase"`.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl PhraseRecord {
    /// Creates a record carrying `phrase` in its attribute map.
    pub fn new(id: impl Into<String>, vector: Vec<f32>, phrase: impl Into<String>) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(
            PHRASE_ATTRIBUTE.to_string(),
            serde_json::Value::String(phrase.into()),
        );
        Self {
            id: id.into(),
            vector,
            metadata,
        }
    }

    /// The human-readable phrase, or the identifier when absent.
    pub fn phrase(&self) -> &str {
        self.metadata
            .get(PHRASE_ATTRIBUTE)
            .and_then(|v| v.as_str())
            .unwrap_or(&self.id)
    }
}

/// One search hit: a phrase with its inner-product score.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseMatch {
    /// Record identifier.
    pub id: String,
    /// Human-readable phrase.
    pub phrase: String,
    /// Inner-product score against the query (cosine for unit vectors).
    pub score: f32,
}

/// Aggregate index statistics.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    /// Number of stored records.
    pub total_vectors: usize,
    /// Vector dimension.
    pub dimension: usize,
    /// Index implementation tag.
    pub index_type: &'static str,
    /// Approximate memory use of the vector data.
    pub memory_usage_bytes: usize,
}
