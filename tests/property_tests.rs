//! Property-based tests using proptest

use proptest::prelude::*;
use sentrank::*;

/// Embeddings with a strictly positive first component, so none is degenerate
fn embeddings(max_sentences: usize, dim: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(
        (0.1f32..1.0, prop::collection::vec(-1.0f32..1.0, dim - 1)).prop_map(|(head, tail)| {
            let mut v = vec![head];
            v.extend(tail);
            v
        }),
        1..max_sentences,
    )
}

fn records_for(doc: u64, vectors: &[Vec<f32>]) -> Vec<SentenceRecord> {
    vectors
        .iter()
        .enumerate()
        .map(|(i, v)| SentenceRecord::new(doc, i, v.clone()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn test_matrix_diagonal_zero_and_symmetric(vectors in embeddings(20, 6)) {
        let matrix = SimilarityMatrixBuilder::new().build(&vectors).unwrap();

        prop_assert_eq!(matrix.len(), vectors.len());
        for i in 0..matrix.len() {
            prop_assert_eq!(matrix.get(i, i), 0.0);
            for j in 0..matrix.len() {
                prop_assert!((matrix.get(i, j) - matrix.get(j, i)).abs() < 1e-9);
                prop_assert!(matrix.get(i, j).abs() <= 1.0);
            }
        }
    }

    #[test]
    fn test_pagerank_scores_sum_to_one(vectors in embeddings(20, 4)) {
        let matrix = SimilarityMatrixBuilder::new().build(&vectors).unwrap();
        let scores = PageRankScorer::new().score(&matrix).unwrap();

        prop_assert_eq!(scores.len(), vectors.len());
        let dense = scores.to_dense();
        prop_assert!(dense.iter().all(|&s| s >= 0.0));
        let sum: f64 = dense.iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-6, "Scores sum to {} instead of 1", sum);
    }

    #[test]
    fn test_rank_is_shared_first_position(scores in prop::collection::vec(0u8..5, 1..30)) {
        // Small integer-valued scores force plenty of ties
        let scores: Vec<f64> = scores.into_iter().map(f64::from).collect();
        let ranks = rank_scores(&scores);

        prop_assert_eq!(ranks.len(), scores.len());
        for (i, &rank) in ranks.iter().enumerate() {
            // Rank = number of strictly higher scores
            let higher = scores.iter().filter(|&&s| s > scores[i]).count();
            prop_assert_eq!(rank, higher);
            prop_assert!(rank < scores.len());
        }
    }

    #[test]
    fn test_ranking_deterministic(vectors in embeddings(15, 5)) {
        let pipeline = SummarizationPipeline::new();
        let a = pipeline.summarize(DocumentId(1), records_for(1, &vectors)).unwrap();
        let b = pipeline.summarize(DocumentId(1), records_for(1, &vectors)).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert!(a.sentences.iter().any(|s| s.importance == 0));
    }

    #[test]
    fn test_pipeline_preserves_order_and_length(
        first in embeddings(10, 3),
        second in embeddings(10, 3),
    ) {
        let mut records = records_for(1, &first);
        records.extend(records_for(2, &second));

        let results = summarize_all(records);
        prop_assert_eq!(results.len(), 2);

        let first_doc = results[0].as_ref().unwrap();
        let second_doc = results[1].as_ref().unwrap();
        prop_assert_eq!(first_doc.len(), first.len());
        prop_assert_eq!(second_doc.len(), second.len());
        for (i, s) in first_doc.sentences.iter().enumerate() {
            prop_assert_eq!(s.index(), i);
            prop_assert_eq!(&s.record.embedding, &first[i]);
        }
    }

    #[test]
    fn test_mismatched_dimensions_rejected(
        vectors in embeddings(10, 4),
        extra in 1usize..4,
    ) {
        let mut vectors = vectors;
        let last = vectors.len();
        vectors.push(vec![0.5; 4 + extra]);

        let err = SimilarityMatrixBuilder::new().build(&vectors).unwrap_err();
        prop_assert_eq!(err, SummarizeError::dimension_mismatch(last, 4, 4 + extra));
    }

    #[test]
    fn test_config_validation_properties(
        damping in 0.0f64..=1.0,
        max_iterations in 1usize..500,
        threshold in 1e-12f64..1e-2,
    ) {
        let config = SummarizerConfig::default()
            .with_damping(damping)
            .with_max_iterations(max_iterations)
            .with_convergence_threshold(threshold);

        prop_assert!(config.validate().is_ok());
    }
}
