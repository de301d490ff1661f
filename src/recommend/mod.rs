//! Recommendation coordinator.
//!
//! Orchestrates one request end to end: load the statement, embed it,
//! generate and score candidates, rerank for diversity, and extract the
//! top raw-similarity phrases. When the dynamic path fails (embedder error
//! or empty output) the request diverts to the pre-embedded phrase index;
//! when that also comes up empty, a fixed default label set is the safety
//! net. Only the failure of both paths surfaces as an error.

pub mod error;


pub use error::RecommendError;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::constants::{
    DEFAULT_FALLBACK_CANDIDATES, DEFAULT_RECOMMEND_K, DEFAULT_TOP_SIMILAR, MIN_STATEMENT_CHARS,
};
use crate::embedding::{EmbeddingError, TextEmbedder};
use crate::generator::{CandidateGenerator, GeneratorConfig};
use crate::index::VectorIndex;
use crate::rerank::{MmrConfig, MmrReranker};
use crate::resume::{ResumeError, ResumeStatus, ResumeStore};
use crate::scoring::{CandidateScorer, ScoredPhrase, top_n};
use crate::text::char_count;
use crate::vocab::VocabStore;

/// Safety-net labels returned when both paths yield nothing.
pub const DEFAULT_TITLES: &[&str] = &[
    "창의적 혁신가",
    "열정적 도전자",
    "섬세한 분석가",
    "적극적 리더",
    "신중한 전략가",
    "유연한 커뮤니케이터",
    "끈기있는 실행자",
    "협력적 팀워커",
    "논리적 사고자",
    "감성적 기획자",
    "체계적 관리자",
    "직관적 문제해결사",
];

/// Which pipeline produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationSource {
    /// Dynamic candidate generation.
    Dynamic,
    /// Pre-embedded phrase index (fallback).
    Index,
    /// Fixed default labels (safety net).
    Default,
}

/// Result of one recommendation request.
#[derive(Debug, Clone)]
pub struct Recommendation {
    /// Final titles, in selection order.
    pub titles: Vec<String>,
    /// Highest raw-similarity phrases, before diversity reranking.
    pub top_similar: Vec<ScoredPhrase>,
    /// Which path produced the result.
    pub source: RecommendationSource,
}

/// Per-request options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendOptions {
    /// Number of titles; `None` uses the configured default.
    pub k: Option<usize>,
    /// Wall-clock budget for the request, propagated to embedder calls.
    pub deadline: Option<Duration>,
}

/// Configuration for [`Recommender`].
#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    /// Default number of titles. Default: `3`.
    pub k: usize,
    /// Size of the raw-similarity extract. Default: `5`.
    pub top_similar: usize,
    /// Candidates requested from the index on fallback. Default: `50`.
    pub fallback_candidates: usize,
    /// Candidate generation settings.
    pub generator: GeneratorConfig,
    /// Reranker settings.
    pub mmr: MmrConfig,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_RECOMMEND_K,
            top_similar: DEFAULT_TOP_SIMILAR,
            fallback_candidates: DEFAULT_FALLBACK_CANDIDATES,
            generator: GeneratorConfig::default(),
            mmr: MmrConfig::default(),
        }
    }
}

/// A dynamic-path failure with whatever the path had produced so far.
struct DynamicFailure {
    query: Option<Vec<f32>>,
    reason: String,
}

/// Coordinates the recommendation pipeline.
pub struct Recommender<E, V, R> {
    embedder: Arc<E>,
    generator: CandidateGenerator<E>,
    scorer: CandidateScorer<E>,
    reranker: MmrReranker,
    index: Arc<V>,
    resumes: Arc<R>,
    config: RecommenderConfig,
}

impl<E, V, R> Recommender<E, V, R>
where
    E: TextEmbedder,
    V: VectorIndex,
    R: ResumeStore,
{
    /// Wires a coordinator from its collaborators.
    pub fn new(
        embedder: Arc<E>,
        vocab: Arc<VocabStore>,
        index: Arc<V>,
        resumes: Arc<R>,
        config: RecommenderConfig,
    ) -> Self {
        let generator =
            CandidateGenerator::new(embedder.clone(), vocab, config.generator.clone());
        let scorer = CandidateScorer::new(embedder.clone());
        let reranker = MmrReranker::with_config(config.mmr);

        Self {
            embedder,
            generator,
            scorer,
            reranker,
            index,
            resumes,
            config,
        }
    }

    /// Returns the active config.
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Produces recommendations for the statement stored under `resume_id`.
    pub async fn recommend(
        &self,
        resume_id: Uuid,
        opts: RecommendOptions,
    ) -> Result<Recommendation, RecommendError> {
        let k = opts.k.unwrap_or(self.config.k);
        let deadline = opts.deadline.map(|budget| Instant::now() + budget);

        let content = self.resumes.content(resume_id).await.map_err(|e| match e {
            ResumeError::NotFound { id } => RecommendError::ResumeNotFound { id },
            other => RecommendError::Unavailable {
                message: other.to_string(),
            },
        })?;

        self.report_status(resume_id, ResumeStatus::Processing).await;

        let length = char_count(&content);
        if length < MIN_STATEMENT_CHARS {
            self.report_status(resume_id, ResumeStatus::Failed).await;
            return Err(RecommendError::TextTooShort {
                length,
                min: MIN_STATEMENT_CHARS,
            });
        }

        info!(resume_id = %resume_id, k, content_length = length, "Recommendation started");

        let outcome = match self.dynamic_path(&content, k, deadline).await {
            Ok(recommendation) => Ok(recommendation),
            Err(failure) => {
                info!(
                    resume_id = %resume_id,
                    reason = %failure.reason,
                    "Dynamic path failed, falling back to phrase index"
                );
                self.fallback_path(&content, failure.query, k, deadline)
                    .await
            }
        };

        match outcome {
            Ok(recommendation) => {
                self.report_status(resume_id, ResumeStatus::Completed).await;
                info!(
                    resume_id = %resume_id,
                    titles = ?recommendation.titles,
                    source = ?recommendation.source,
                    "Recommendation completed"
                );
                Ok(recommendation)
            }
            Err(e) => {
                self.report_status(resume_id, ResumeStatus::Failed).await;
                Err(e)
            }
        }
    }

    /// Dynamic pipeline: embed, generate, score, rerank.
    async fn dynamic_path(
        &self,
        content: &str,
        k: usize,
        deadline: Option<Instant>,
    ) -> Result<Recommendation, DynamicFailure> {
        let query = match self.embed_with_deadline(content, deadline).await {
            Ok(query) => query,
            Err(e) => {
                return Err(DynamicFailure {
                    query: None,
                    reason: e.to_string(),
                });
            }
        };

        let candidates = match with_deadline(deadline, self.generator.generate(&query)).await {
            Ok(Ok(candidates)) => candidates,
            Ok(Err(e)) => {
                return Err(DynamicFailure {
                    query: Some(query),
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                return Err(DynamicFailure {
                    query: Some(query),
                    reason: "candidate generation exceeded the request deadline".to_string(),
                });
            }
        };

        if candidates.is_empty() {
            return Err(DynamicFailure {
                query: Some(query),
                reason: "candidate generation produced no pairs".to_string(),
            });
        }

        let scored = match with_deadline(deadline, self.scorer.score(&query, &candidates)).await {
            Ok(Ok(scored)) => scored,
            Ok(Err(e)) => {
                return Err(DynamicFailure {
                    query: Some(query),
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                return Err(DynamicFailure {
                    query: Some(query),
                    reason: "candidate scoring exceeded the request deadline".to_string(),
                });
            }
        };

        debug!(candidates = scored.len(), "Dynamic path scored candidate pool");

        Ok(self.assemble(scored, k, RecommendationSource::Dynamic))
    }

    /// Fallback pipeline: search the pre-embedded index, rerank the matches.
    ///
    /// Reuses the query vector when the dynamic path got far enough to
    /// produce one; otherwise re-attempts a single embed, whose failure is
    /// fatal for the request.
    async fn fallback_path(
        &self,
        content: &str,
        query: Option<Vec<f32>>,
        k: usize,
        deadline: Option<Instant>,
    ) -> Result<Recommendation, RecommendError> {
        let query = match query {
            Some(query) => query,
            None => self
                .embed_with_deadline(content, deadline)
                .await
                .map_err(|e| RecommendError::Unavailable {
                    message: format!("embedder unavailable in fallback: {}", e),
                })?,
        };

        let matches = self
            .index
            .search(&query, self.config.fallback_candidates)
            .map_err(|e| RecommendError::Unavailable {
                message: format!("phrase index unavailable: {}", e),
            })?;

        if matches.is_empty() {
            warn!("Fallback index returned no matches, serving default titles");
            return Ok(Recommendation {
                titles: default_titles(k),
                top_similar: Vec::new(),
                source: RecommendationSource::Default,
            });
        }

        let scored: Vec<ScoredPhrase> = matches
            .into_iter()
            .map(|m| ScoredPhrase::new(m.phrase, m.score))
            .collect();

        debug!(candidates = scored.len(), "Fallback path scored index matches");

        Ok(self.assemble(scored, k, RecommendationSource::Index))
    }

    /// Reranks the pool and extracts the raw top-similar list.
    fn assemble(
        &self,
        scored: Vec<ScoredPhrase>,
        k: usize,
        source: RecommendationSource,
    ) -> Recommendation {
        let top_similar = top_n(&scored, self.config.top_similar);
        let titles = self
            .reranker
            .rerank(&scored, k)
            .into_iter()
            .map(|s| s.phrase)
            .collect();

        Recommendation {
            titles,
            top_similar,
            source,
        }
    }

    /// Embeds `content`, honoring the request deadline when one is set.
    async fn embed_with_deadline(
        &self,
        content: &str,
        deadline: Option<Instant>,
    ) -> Result<Vec<f32>, EmbeddingError> {
        with_deadline(deadline, self.embedder.embed(content))
            .await
            .map_err(|_| EmbeddingError::DeadlineExceeded)?
    }

    /// Advisory status report; failures are logged, never surfaced.
    async fn report_status(&self, resume_id: Uuid, status: ResumeStatus) {
        if let Err(e) = self.resumes.update_status(resume_id, status).await {
            warn!(resume_id = %resume_id, error = %e, "Status report failed");
        }
    }
}

/// Runs `fut` to completion, or aborts it (by drop) at `deadline`.
async fn with_deadline<F>(
    deadline: Option<Instant>,
    fut: F,
) -> Result<F::Output, tokio::time::error::Elapsed>
where
    F: std::future::Future,
{
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, fut).await,
        None => Ok(fut.await),
    }
}

/// The first `k` entries of the fixed default label list.
pub fn default_titles(k: usize) -> Vec<String> {
    DEFAULT_TITLES
        .iter()
        .take(k)
        .map(|t| t.to_string())
        .collect()
}
