//! End-to-end recommendation scenarios over the mocked embedding backend.

mod common;

use common::fixtures::{
    HarnessBuilder, MODIFIERS, PipelineHarness, TECHNICAL_STATEMENT,
};
use moniker::constants::dot;
use moniker::recommend::{RecommendError, RecommendOptions, RecommendationSource};
use uuid::Uuid;

#[tokio::test]
async fn happy_path_technical_statement() {
    let h = PipelineHarness::with_defaults();
    let record = h.resumes.store(TECHNICAL_STATEMENT).unwrap();

    let result = h
        .recommender
        .recommend(record.id, RecommendOptions::default())
        .await
        .unwrap();

    assert_eq!(result.source, RecommendationSource::Dynamic);
    assert_eq!(result.titles.len(), 3);
    for title in &result.titles {
        assert_eq!(
            title.split_whitespace().count(),
            2,
            "title is not a two-token rendering: {}",
            title
        );
    }

    // At least one returned modifier sits in the top-10 of the word-level
    // relevance ranking for this query.
    let query = h.embedder.vector_for(&record.content);
    let mut ranked: Vec<(&str, f32)> = MODIFIERS
        .iter()
        .map(|m| (*m, dot(&query, &h.embedder.vector_for(m))))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
    let top10: Vec<&str> = ranked.iter().take(10).map(|(m, _)| *m).collect();

    let hit = result.titles.iter().any(|title| {
        let modifier = title.split_whitespace().next().unwrap();
        top10.contains(&modifier)
    });
    assert!(hit, "no title modifier in the relevance top-10: {:?}", result.titles);
}

#[tokio::test]
async fn diversity_is_enforced_on_shared_modifiers() {
    // A single modifier paired with many nouns floods the top of the pool;
    // the first-token similarity floor must keep the final three from all
    // sharing it.
    let h = HarnessBuilder::new()
        .vocabulary(
            &["밝은", "깊은", "새로운"],
            &["별", "꿈", "바람", "에너지", "빛", "길", "문", "집"],
        )
        .filter_sizes(1, 8)
        .build();

    let record = h.resumes.store(TECHNICAL_STATEMENT).unwrap();
    let result = h
        .recommender
        .recommend(record.id, RecommendOptions::default())
        .await
        .unwrap();

    // Only one modifier survives the filter here, so every candidate shares
    // it; MMR must still return three distinct phrases.
    let unique: std::collections::HashSet<&String> = result.titles.iter().collect();
    assert_eq!(unique.len(), 3);

    let wide = HarnessBuilder::new()
        .vocabulary(
            &["밝은", "깊은", "새로운", "따뜻한"],
            &["별", "꿈", "바람", "에너지", "빛", "길"],
        )
        .filter_sizes(4, 6)
        .build();
    let record = wide.resumes.store(TECHNICAL_STATEMENT).unwrap();
    let result = wide
        .recommender
        .recommend(record.id, RecommendOptions::default())
        .await
        .unwrap();

    let mut by_modifier = std::collections::HashMap::new();
    for title in &result.titles {
        let modifier = title.split_whitespace().next().unwrap().to_string();
        *by_modifier.entry(modifier).or_insert(0usize) += 1;
    }
    for (modifier, count) in by_modifier {
        assert!(count <= 2, "modifier '{}' repeated {} times", modifier, count);
    }
}

#[tokio::test]
async fn embedder_batch_failure_triggers_index_fallback() {
    let h = PipelineHarness::with_defaults();
    h.seed_index(&[
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
    ]);

    let record = h.resumes.store(TECHNICAL_STATEMENT).unwrap();
    h.embedder.fail_batch(true);

    let result = h
        .recommender
        .recommend(record.id, RecommendOptions::default())
        .await
        .unwrap();

    assert_eq!(result.source, RecommendationSource::Index);
    assert_eq!(result.titles.len(), 3);
    assert_eq!(result.top_similar.len(), 5, "top_similar must be min(5, seeded)");
}

#[tokio::test]
async fn fallback_with_fewer_seeded_phrases_shrinks_top_similar() {
    let h = PipelineHarness::with_defaults();
    h.seed_index(&["창의적 혁신가", "열정적 도전자", "섬세한 분석가"]);

    let record = h.resumes.store(TECHNICAL_STATEMENT).unwrap();
    h.embedder.fail_batch(true);

    let result = h
        .recommender
        .recommend(record.id, RecommendOptions::default())
        .await
        .unwrap();

    assert_eq!(result.top_similar.len(), 3);
}

#[tokio::test]
async fn both_paths_failing_surfaces_unavailable() {
    let h = PipelineHarness::with_defaults();
    let record = h.resumes.store(TECHNICAL_STATEMENT).unwrap();

    h.embedder.fail_single(true);
    h.embedder.fail_batch(true);

    let err = h
        .recommender
        .recommend(record.id, RecommendOptions::default())
        .await
        .unwrap_err();

    assert!(
        matches!(err, RecommendError::Unavailable { .. }),
        "expected Unavailable, got: {:?}",
        err
    );
}

#[tokio::test]
async fn empty_index_fallback_serves_defaults_not_error() {
    let h = PipelineHarness::with_defaults();
    let record = h.resumes.store(TECHNICAL_STATEMENT).unwrap();

    h.embedder.fail_batch(true);

    let result = h
        .recommender
        .recommend(record.id, RecommendOptions::default())
        .await
        .unwrap();

    assert_eq!(result.source, RecommendationSource::Default);
    assert_eq!(result.titles.len(), 3);
    assert!(result.top_similar.is_empty());
}

#[tokio::test]
async fn top_similar_is_pre_rerank_relevance() {
    let h = HarnessBuilder::new().filter_sizes(10, 12).build();
    let record = h.resumes.store(TECHNICAL_STATEMENT).unwrap();

    let result = h
        .recommender
        .recommend(record.id, RecommendOptions::default())
        .await
        .unwrap();

    // Descending order within the extract.
    for window in result.top_similar.windows(2) {
        assert!(window[0].score >= window[1].score);
    }

    // The raw-relevance maximum dominates every MMR-selected title's score.
    let best = result.top_similar.first().unwrap().score;
    let title_scores: Vec<f32> = result
        .titles
        .iter()
        .map(|title| {
            dot(
                &h.embedder.vector_for(&record.content),
                &h.embedder.vector_for(title),
            )
        })
        .collect();
    for score in title_scores {
        assert!(best >= score - 1e-6);
    }
}

#[tokio::test]
async fn unknown_resume_makes_no_embedder_calls() {
    let h = PipelineHarness::with_defaults();

    let err = h
        .recommender
        .recommend(Uuid::new_v4(), RecommendOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RecommendError::ResumeNotFound { .. }));
    assert_eq!(h.embedder.total_calls(), 0);
}

#[tokio::test]
async fn repeated_requests_are_deterministic_without_exploration() {
    let h = PipelineHarness::with_defaults();
    let record = h.resumes.store(TECHNICAL_STATEMENT).unwrap();

    let first = h
        .recommender
        .recommend(record.id, RecommendOptions::default())
        .await
        .unwrap();
    let second = h
        .recommender
        .recommend(record.id, RecommendOptions::default())
        .await
        .unwrap();

    assert_eq!(first.titles, second.titles);
}

#[tokio::test]
async fn seeded_exploration_is_reproducible_across_pipelines() {
    let a = HarnessBuilder::new().exploration(1234).build();
    let b = HarnessBuilder::new().exploration(1234).build();

    let record_a = a.resumes.store(TECHNICAL_STATEMENT).unwrap();
    let record_b = b.resumes.store(TECHNICAL_STATEMENT).unwrap();

    let first = a
        .recommender
        .recommend(record_a.id, RecommendOptions::default())
        .await
        .unwrap();
    let second = b
        .recommender
        .recommend(record_b.id, RecommendOptions::default())
        .await
        .unwrap();

    assert_eq!(first.titles, second.titles);
}
