use super::*;
use crate::embedding::MockEmbedder;

const DIM: usize = 64;

fn candidates(pairs: &[(&str, &str)]) -> Vec<Candidate> {
    pairs.iter().map(|(m, n)| Candidate::new(*m, *n)).collect()
}

#[tokio::test]
async fn test_score_is_order_preserving() {
    let embedder = Arc::new(MockEmbedder::new(DIM));
    let scorer = CandidateScorer::new(embedder.clone());
    let input = candidates(&[("밝은", "별"), ("깊은", "바다"), ("새로운", "꿈")]);

    let query = embedder.vector_for("어떤 문장");
    let scored = scorer.score(&query, &input).await.unwrap();

    assert_eq!(scored.len(), input.len());
    for (candidate, scored) in input.iter().zip(scored.iter()) {
        assert_eq!(candidate.rendering(), scored.phrase);
    }
}

#[tokio::test]
async fn test_scores_within_cosine_range() {
    let embedder = Arc::new(MockEmbedder::new(DIM));
    let scorer = CandidateScorer::new(embedder.clone());
    let input = candidates(&[("밝은", "별"), ("깊은", "바다"), ("빠른", "바람"), ("큰", "꿈")]);

    let query = embedder.vector_for("저는 새로운 기술을 배우는 것을 좋아합니다");
    let scored = scorer.score(&query, &input).await.unwrap();

    for s in &scored {
        assert!((-1.0..=1.0).contains(&s.score), "score out of range: {}", s.score);
    }
}

#[tokio::test]
async fn test_score_of_query_identical_phrase_is_one() {
    let embedder = Arc::new(MockEmbedder::new(DIM));
    let scorer = CandidateScorer::new(embedder.clone());
    let input = candidates(&[("밝은", "별")]);

    // The query embeds the exact rendering, so cosine must be ~1.
    let query = embedder.vector_for("밝은 별");
    let scored = scorer.score(&query, &input).await.unwrap();
    assert!((scored[0].score - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn test_score_empty_input() {
    let embedder = Arc::new(MockEmbedder::new(DIM));
    let scorer = CandidateScorer::new(embedder.clone());

    let query = embedder.vector_for("문장");
    let scored = scorer.score(&query, &[]).await.unwrap();
    assert!(scored.is_empty());
    assert_eq!(embedder.batch_calls(), 0);
}

#[tokio::test]
async fn test_score_uses_single_batch_call() {
    let embedder = Arc::new(MockEmbedder::new(DIM));
    let scorer = CandidateScorer::new(embedder.clone());
    let input = candidates(&[("밝은", "별"), ("깊은", "바다")]);

    let query = embedder.vector_for("문장");
    let _ = scorer.score(&query, &input).await.unwrap();
    assert_eq!(embedder.batch_calls(), 1);
}

#[test]
fn test_top_n_orders_and_truncates() {
    let scored = vec![
        ScoredPhrase::new("a", 0.2),
        ScoredPhrase::new("b", 0.9),
        ScoredPhrase::new("c", 0.5),
        ScoredPhrase::new("d", 0.7),
    ];

    let top = top_n(&scored, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].phrase, "b");
    assert_eq!(top[1].phrase, "d");
}

#[test]
fn test_top_n_larger_than_input() {
    let scored = vec![ScoredPhrase::new("a", 0.2)];
    assert_eq!(top_n(&scored, 5).len(), 1);
}
