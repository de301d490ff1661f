//! Resume (personal statement) store façade.
//!
//! The coordinator only needs two guarantees from this component: a stored
//! identifier resolves to the exact text that was accepted at intake, and
//! status updates are best-effort advisory. [`MemoryResumeStore`] is the
//! in-process implementation; the [`ResumeStore`] trait is the seam a
//! database-backed implementation would plug into.

pub mod error;


pub use error::ResumeError;

use std::collections::HashMap;
use std::future::Future;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::constants::{MAX_STATEMENT_CHARS, MIN_STATEMENT_CHARS};
use crate::text::{char_count, clean_text, truncate_text};

/// Processing state of a stored statement. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeStatus {
    /// Accepted at intake.
    Uploaded,
    /// A recommendation request is in flight.
    Processing,
    /// The last recommendation completed.
    Completed,
    /// The last recommendation failed.
    Failed,
}

/// A stored statement with its intake metadata.
#[derive(Debug, Clone)]
pub struct ResumeRecord {
    /// Opaque identifier minted at intake.
    pub id: Uuid,
    /// Normalized statement text.
    pub content: String,
    /// blake3 hash of the stored content, hex-encoded.
    pub content_hash: String,
    /// Advisory processing status.
    pub status: ResumeStatus,
}

/// Read/report interface the coordinator depends on.
pub trait ResumeStore: Send + Sync {
    /// Returns the stored text for `id`.
    fn content(&self, id: Uuid) -> impl Future<Output = Result<String, ResumeError>> + Send;

    /// Updates the advisory processing status for `id`.
    fn update_status(
        &self,
        id: Uuid,
        status: ResumeStatus,
    ) -> impl Future<Output = Result<(), ResumeError>> + Send;
}

/// In-memory resume store.
#[derive(Default)]
pub struct MemoryResumeStore {
    records: RwLock<HashMap<Uuid, ResumeRecord>>,
}

impl MemoryResumeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a statement: normalizes whitespace, validates the length
    /// bounds (in code points), and stores it under a fresh identifier.
    pub fn store(&self, text: &str) -> Result<ResumeRecord, ResumeError> {
        let cleaned = clean_text(text);
        let length = char_count(&cleaned);

        if length < MIN_STATEMENT_CHARS {
            return Err(ResumeError::TextTooShort {
                length,
                min: MIN_STATEMENT_CHARS,
            });
        }
        if length > MAX_STATEMENT_CHARS {
            return Err(ResumeError::TextTooLong {
                length,
                max: MAX_STATEMENT_CHARS,
            });
        }

        let record = ResumeRecord {
            id: Uuid::new_v4(),
            content_hash: blake3::hash(cleaned.as_bytes()).to_hex().to_string(),
            content: cleaned,
            status: ResumeStatus::Uploaded,
        };

        debug!(
            resume_id = %record.id,
            content_length = length,
            content_hash = %record.content_hash,
            preview = %truncate_text(&record.content, 40),
            "Statement stored"
        );

        self.records.write().insert(record.id, record.clone());
        Ok(record)
    }

    /// Fetches a full record (tooling and tests).
    pub fn get(&self, id: Uuid) -> Option<ResumeRecord> {
        self.records.read().get(&id).cloned()
    }

    /// Number of stored statements.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl ResumeStore for MemoryResumeStore {
    async fn content(&self, id: Uuid) -> Result<String, ResumeError> {
        self.records
            .read()
            .get(&id)
            .map(|r| r.content.clone())
            .ok_or(ResumeError::NotFound { id })
    }

    async fn update_status(&self, id: Uuid, status: ResumeStatus) -> Result<(), ResumeError> {
        let mut records = self.records.write();
        let record = records.get_mut(&id).ok_or(ResumeError::NotFound { id })?;
        record.status = status;
        Ok(())
    }
}
