//! Moniker library crate (used by the server and integration tests).
//!
//! Recommends short personalized labels (modifier + noun pairs) for a
//! free-form personal statement. The pipeline embeds the statement, builds a
//! candidate pool from two vocabulary lists, scores the candidates, and
//! reranks them under a diversity constraint; a pre-embedded phrase index
//! backs the fallback path.
//!
//! # Public API Surface
//!
//! - [`Config`], [`ConfigError`] — server configuration
//! - [`TextEmbedder`], [`HttpEmbedder`], [`EmbedderConfig`] — embedding backend
//! - [`VocabStore`] — modifier/noun word pools
//! - [`CandidateGenerator`], [`Candidate`] — dynamic candidate generation
//! - [`CandidateScorer`], [`ScoredPhrase`] — relevance scoring
//! - [`MmrReranker`], [`MmrConfig`] — diversity reranking
//! - [`VectorIndex`], [`FlatIndex`], [`PhraseRecord`] — fallback phrase index
//! - [`Recommender`], [`Recommendation`] — request coordination
//! - [`MemoryResumeStore`], [`ResumeStore`] — statement intake façade
//!
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod generator;
pub mod index;
pub mod recommend;
pub mod rerank;
pub mod resume;
pub mod scoring;
pub mod text;
pub mod vocab;

pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_K_MODIFIERS, DEFAULT_K_NOUNS, DEFAULT_MMR_LAMBDA,
    DEFAULT_RECOMMEND_K, DEFAULT_TOP_SIMILAR, DimMismatch, dot, l2_normalize, validate_vector_dim,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use embedding::{EmbedderConfig, EmbeddingError, HttpEmbedder, TextEmbedder};
pub use gateway::{GatewayError, HandlerState, create_router_with_state};
pub use generator::{Candidate, CandidateGenerator, GeneratorConfig, GeneratorError};
pub use index::{
    FlatIndex, IndexError, IndexStats, PHRASE_ATTRIBUTE, PhraseMatch, PhraseRecord,
    SNAPSHOT_FILENAME, VectorIndex,
};
pub use recommend::{
    DEFAULT_TITLES, RecommendError, RecommendOptions, Recommendation, RecommendationSource,
    Recommender, RecommenderConfig, default_titles,
};
pub use rerank::{MmrConfig, MmrReranker, token_similarity};
pub use resume::{MemoryResumeStore, ResumeError, ResumeRecord, ResumeStatus, ResumeStore};
pub use scoring::{CandidateScorer, ScoredPhrase, top_n};
pub use text::{char_count, clean_text, truncate_text};
pub use vocab::{VocabError, VocabStore};
