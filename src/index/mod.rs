//! Phrase vector index (fallback search path).
//!
//! [`FlatIndex`] is a content-addressed in-memory store over pre-embedded
//! phrases with brute-force inner-product search, adequate up to roughly a
//! million records at dimension 768. One readers-writer lock guards the
//! whole map: searches take the read lock, mutations the write lock, so a
//! search never observes a partially applied batch.
//!
//! The full map is serialized to a single JSON file after every mutation
//! batch and on close. The file is written to a temp path and renamed, so a
//! crash mid-write leaves the previous snapshot intact. A missing or corrupt
//! snapshot at startup yields an empty, healthy index and a warning.

pub mod error;
pub mod model;


pub use error::IndexError;
pub use model::{IndexStats, PHRASE_ATTRIBUTE, PhraseMatch, PhraseRecord};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::constants::l2_normalize;

/// Snapshot filename inside the index directory.
pub const SNAPSHOT_FILENAME: &str = "vectors.json";

/// Top-K nearest-phrase search over stored records.
pub trait VectorIndex: Send + Sync {
    /// Inserts or replaces records by identifier.
    fn add(&self, records: Vec<PhraseRecord>) -> Result<(), IndexError>;

    /// Returns the `top_k` highest inner-product matches, descending.
    fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<PhraseMatch>, IndexError>;

    /// Replaces a single record's vector and attributes.
    fn update(
        &self,
        id: &str,
        vector: Vec<f32>,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<(), IndexError>;

    /// Removes records by identifier; unknown ids are ignored.
    fn delete(&self, ids: &[String]) -> Result<(), IndexError>;

    /// Aggregate statistics.
    fn stats(&self) -> Result<IndexStats, IndexError>;

    /// Checks that the index is open and its directory reachable.
    fn health_check(&self) -> Result<(), IndexError>;

    /// Persists the snapshot and rejects further operations.
    fn close(&self) -> Result<(), IndexError>;
}

struct IndexState {
    records: HashMap<String, PhraseRecord>,
    closed: bool,
}

/// Flat (exhaustive-scan) phrase index with JSON snapshot persistence.
pub struct FlatIndex {
    dimension: usize,
    directory: PathBuf,
    state: RwLock<IndexState>,
}

impl FlatIndex {
    /// Opens the index in `directory`, loading an existing snapshot when
    /// present. A malformed snapshot is ignored with a warning.
    pub fn open(directory: impl Into<PathBuf>, dimension: usize) -> Result<Self, IndexError> {
        let directory = directory.into();

        std::fs::create_dir_all(&directory).map_err(|e| IndexError::CreateDirFailed {
            path: directory.clone(),
            source: e,
        })?;

        let records = Self::load_snapshot(&directory.join(SNAPSHOT_FILENAME), dimension);

        info!(
            directory = %directory.display(),
            dimension,
            loaded_records = records.len(),
            "Phrase index opened"
        );

        Ok(Self {
            dimension,
            directory,
            state: RwLock::new(IndexState {
                records,
                closed: false,
            }),
        })
    }

    /// The configured vector dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Fetches a record by id (mainly for tooling and tests).
    pub fn get(&self, id: &str) -> Option<PhraseRecord> {
        self.state.read().records.get(id).cloned()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    /// Returns `true` if the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }

    fn load_snapshot(path: &Path, dimension: usize) -> HashMap<String, PhraseRecord> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(_) => return HashMap::new(),
        };

        match serde_json::from_slice::<HashMap<String, PhraseRecord>>(&data) {
            Ok(mut records) => {
                let before = records.len();
                records.retain(|_, r| r.vector.len() == dimension);
                if records.len() < before {
                    warn!(
                        dropped = before - records.len(),
                        "Dropped snapshot records with wrong dimension"
                    );
                }
                records
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Corrupt index snapshot ignored, starting empty"
                );
                HashMap::new()
            }
        }
    }

    /// Serializes the record map to the snapshot file, atomically.
    fn persist(&self, records: &HashMap<String, PhraseRecord>) -> Result<(), IndexError> {
        let path = self.directory.join(SNAPSHOT_FILENAME);
        let tmp_path = self.directory.join(format!("{}.tmp", SNAPSHOT_FILENAME));

        let data = serde_json::to_vec(records).map_err(|e| IndexError::PersistFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;

        std::fs::write(&tmp_path, data).map_err(|e| IndexError::PersistFailed {
            path: tmp_path.clone(),
            message: e.to_string(),
        })?;

        std::fs::rename(&tmp_path, &path).map_err(|e| IndexError::PersistFailed {
            path,
            message: e.to_string(),
        })?;

        Ok(())
    }

    fn check_dimension(&self, vector: &[f32]) -> Result<(), IndexError> {
        if vector.len() != self.dimension {
            return Err(IndexError::InvalidDimension {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

impl VectorIndex for FlatIndex {
    fn add(&self, records: Vec<PhraseRecord>) -> Result<(), IndexError> {
        let mut state = self.state.write();
        if state.closed {
            return Err(IndexError::Closed);
        }

        for mut record in records {
            self.check_dimension(&record.vector)?;
            l2_normalize(&mut record.vector);
            state.records.insert(record.id.clone(), record);
        }

        self.persist(&state.records)?;

        debug!(total = state.records.len(), "Records added to phrase index");
        Ok(())
    }

    fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<PhraseMatch>, IndexError> {
        let state = self.state.read();
        if state.closed {
            return Err(IndexError::Closed);
        }

        self.check_dimension(query)?;

        let mut normalized_query = query.to_vec();
        l2_normalize(&mut normalized_query);

        let mut matches: Vec<PhraseMatch> = state
            .records
            .values()
            .map(|record| PhraseMatch {
                id: record.id.clone(),
                phrase: record.phrase().to_string(),
                score: crate::constants::dot(&normalized_query, &record.vector),
            })
            .collect();

        // Descending score; lexicographic id keeps ties deterministic.
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        matches.truncate(top_k);

        Ok(matches)
    }

    fn update(
        &self,
        id: &str,
        mut vector: Vec<f32>,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<(), IndexError> {
        let mut state = self.state.write();
        if state.closed {
            return Err(IndexError::Closed);
        }

        self.check_dimension(&vector)?;
        l2_normalize(&mut vector);

        state.records.insert(
            id.to_string(),
            PhraseRecord {
                id: id.to_string(),
                vector,
                metadata,
            },
        );

        self.persist(&state.records)?;
        Ok(())
    }

    fn delete(&self, ids: &[String]) -> Result<(), IndexError> {
        let mut state = self.state.write();
        if state.closed {
            return Err(IndexError::Closed);
        }

        let mut deleted = 0;
        for id in ids {
            if state.records.remove(id).is_some() {
                deleted += 1;
            }
        }

        if deleted > 0 {
            self.persist(&state.records)?;
        }

        info!(deleted, remaining = state.records.len(), "Records deleted");
        Ok(())
    }

    fn stats(&self) -> Result<IndexStats, IndexError> {
        let state = self.state.read();

        Ok(IndexStats {
            total_vectors: state.records.len(),
            dimension: self.dimension,
            index_type: "flat",
            memory_usage_bytes: state.records.len() * self.dimension * std::mem::size_of::<f32>(),
        })
    }

    fn health_check(&self) -> Result<(), IndexError> {
        let state = self.state.read();
        if state.closed {
            return Err(IndexError::Closed);
        }
        if !self.directory.is_dir() {
            return Err(IndexError::DirNotAccessible {
                path: self.directory.clone(),
            });
        }
        Ok(())
    }

    fn close(&self) -> Result<(), IndexError> {
        let mut state = self.state.write();
        if state.closed {
            return Ok(());
        }

        self.persist(&state.records)?;
        state.closed = true;

        info!(records = state.records.len(), "Phrase index closed");
        Ok(())
    }
}
