//! Test fixtures for integration tests.

use std::sync::Arc;

use moniker::embedding::MockEmbedder;
use moniker::generator::GeneratorConfig;
use moniker::index::{FlatIndex, PhraseRecord, VectorIndex};
use moniker::recommend::{Recommender, RecommenderConfig};
use moniker::resume::MemoryResumeStore;
use moniker::rerank::MmrConfig;
use moniker::vocab::VocabStore;

pub const DIM: usize = 48;

pub const TECHNICAL_STATEMENT: &str = "안녕하세요. 저는 창의적이고 열정적인 개발자입니다. \
    새로운 기술을 배우는 것을 좋아하며, 팀워크를 중시합니다. 데이터 기반으로 문제를 분석하고 \
    체계적으로 시스템을 설계하는 일에 강점이 있습니다. 항상 밝은 에너지로 주변 사람들에게 \
    긍정적인 영향을 주려고 노력하며, 어려운 과제일수록 끈기있게 학습하고 도전합니다.";

pub const MODIFIERS: &[&str] = &[
    "밝은",
    "깊은",
    "빠른",
    "새로운",
    "따뜻한",
    "창의적인",
    "열정적인",
    "체계적인",
    "논리적인",
    "유연한",
    "신중한",
    "용감한",
];

pub const NOUNS: &[&str] = &[
    "별",
    "꿈",
    "바람",
    "에너지",
    "개발자",
    "도전자",
    "분석가",
    "설계자",
    "탐험가",
    "전략가",
    "실행자",
    "리더",
];

/// Everything a pipeline test needs, wired over mocks and a temp index.
pub struct PipelineHarness {
    pub embedder: Arc<MockEmbedder>,
    pub index: Arc<FlatIndex>,
    pub resumes: Arc<MemoryResumeStore>,
    pub recommender: Recommender<MockEmbedder, FlatIndex, MemoryResumeStore>,
    _dir: tempfile::TempDir,
}

#[derive(Default)]
pub struct HarnessBuilder {
    exploration: bool,
    seed: Option<u64>,
    k_modifiers: Option<usize>,
    k_nouns: Option<usize>,
    lambda: Option<f32>,
    modifiers: Option<Vec<String>>,
    nouns: Option<Vec<String>>,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exploration(mut self, seed: u64) -> Self {
        self.exploration = true;
        self.seed = Some(seed);
        self
    }

    pub fn filter_sizes(mut self, k_modifiers: usize, k_nouns: usize) -> Self {
        self.k_modifiers = Some(k_modifiers);
        self.k_nouns = Some(k_nouns);
        self
    }

    pub fn lambda(mut self, lambda: f32) -> Self {
        self.lambda = Some(lambda);
        self
    }

    pub fn vocabulary(mut self, modifiers: &[&str], nouns: &[&str]) -> Self {
        self.modifiers = Some(modifiers.iter().map(|s| s.to_string()).collect());
        self.nouns = Some(nouns.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn build(self) -> PipelineHarness {
        let dir = tempfile::tempdir().unwrap();
        let embedder = Arc::new(MockEmbedder::new(DIM));

        let modifiers = self
            .modifiers
            .unwrap_or_else(|| MODIFIERS.iter().map(|s| s.to_string()).collect());
        let nouns = self
            .nouns
            .unwrap_or_else(|| NOUNS.iter().map(|s| s.to_string()).collect());
        let vocab = Arc::new(VocabStore::from_words(modifiers, nouns).unwrap());

        let index = Arc::new(FlatIndex::open(dir.path(), DIM).unwrap());
        let resumes = Arc::new(MemoryResumeStore::new());

        let config = RecommenderConfig {
            generator: GeneratorConfig {
                k_modifiers: self.k_modifiers.unwrap_or(6),
                k_nouns: self.k_nouns.unwrap_or(8),
                exploration: self.exploration,
                seed: self.seed,
            },
            mmr: self
                .lambda
                .map(MmrConfig::with_lambda)
                .unwrap_or_default(),
            ..Default::default()
        };

        let recommender = Recommender::new(
            embedder.clone(),
            vocab,
            index.clone(),
            resumes.clone(),
            config,
        );

        PipelineHarness {
            embedder,
            index,
            resumes,
            recommender,
            _dir: dir,
        }
    }
}

impl PipelineHarness {
    pub fn with_defaults() -> Self {
        HarnessBuilder::new().build()
    }

    /// Seeds the fallback index with mock-embedded phrases.
    pub fn seed_index(&self, phrases: &[&str]) {
        let records: Vec<PhraseRecord> = phrases
            .iter()
            .enumerate()
            .map(|(i, phrase)| {
                PhraseRecord::new(
                    format!("seed-{:03}", i),
                    self.embedder.vector_for(phrase),
                    *phrase,
                )
            })
            .collect();
        self.index.add(records).unwrap();
    }
}
