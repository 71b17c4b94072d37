//! Centrality scoring
//!
//! A [`CentralityScorer`] turns a document's similarity matrix into one
//! score per sentence. [`PageRankScorer`] is the standard implementation:
//! sentences endorse the sentences they resemble, and a sentence that is
//! strongly similar to many others accrues a high score.

use crate::errors::{Result, SummarizeError};
use crate::graph::builder::SimilarityMatrix;
use crate::graph::csr::CsrGraph;
use crate::pagerank::standard::StandardPageRank;
use crate::types::SummarizerConfig;
use rustc_hash::FxHashMap;

/// Centrality score per sentence index, plus how the scores were reached.
///
/// Scores are non-negative and only meaningful relative to each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CentralityScores {
    scores: FxHashMap<usize, f64>,
    /// Iterations the scorer ran
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Whether the scorer converged before its iteration cap
    pub converged: bool,
}

impl CentralityScores {
    /// Wrap a dense score vector (entry `i` is the score of sentence `i`)
    pub fn from_dense(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores: scores.into_iter().enumerate().collect(),
            iterations,
            delta,
            converged,
        }
    }

    /// Wrap an explicit index → score map
    pub fn from_map(scores: FxHashMap<usize, f64>) -> Self {
        Self {
            scores,
            iterations: 0,
            delta: 0.0,
            converged: true,
        }
    }

    /// Score of the sentence at `index`
    pub fn get(&self, index: usize) -> Option<f64> {
        self.scores.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scores as a dense vector ordered by sentence index.
    ///
    /// Indexes without a score are skipped.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut entries: Vec<_> = self.scores.iter().map(|(&i, &s)| (i, s)).collect();
        entries.sort_by_key(|&(i, _)| i);
        entries.into_iter().map(|(_, s)| s).collect()
    }

    /// Re-key row-ordered scores by sentence index.
    ///
    /// A scorer keys its output by matrix row, and row `r` is the `r`-th
    /// record of the document as it arrived. `indexes` yields each row's
    /// sentence index, in row order.
    ///
    /// # Errors
    ///
    /// [`SummarizeError::MissingScore`] if a row has no score, and
    /// [`SummarizeError::InvalidDocument`] if two rows claim the same index.
    pub fn keyed_by<I>(self, indexes: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut scores = FxHashMap::default();
        for (row, index) in indexes.into_iter().enumerate() {
            let score = self
                .get(row)
                .ok_or_else(|| SummarizeError::missing_score(index))?;
            if scores.insert(index, score).is_some() {
                return Err(SummarizeError::invalid_document(format!(
                    "duplicate sentence index {}",
                    index
                )));
            }
        }

        Ok(Self { scores, ..self })
    }
}

impl FromIterator<(usize, f64)> for CentralityScores {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

/// Scores sentence centrality from a similarity matrix.
pub trait CentralityScorer {
    /// Produce one score per row of `matrix`.
    fn score(&self, matrix: &SimilarityMatrix) -> Result<CentralityScores>;
}

/// PageRank over the sentence similarity graph.
///
/// Edge `i -> j` has weight `matrix[i][j]` when that similarity is positive.
/// A single sentence scores 1.0; a graph with no edges scores uniformly.
#[derive(Debug, Clone, Default)]
pub struct PageRankScorer {
    pub pagerank: StandardPageRank,
    /// Fail instead of returning the estimate at the iteration cap
    pub strict_convergence: bool,
}

impl PageRankScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SummarizerConfig) -> Self {
        Self {
            pagerank: StandardPageRank::from_config(config),
            strict_convergence: config.strict_convergence,
        }
    }

    /// Builder method: require convergence
    pub fn with_strict_convergence(mut self, strict: bool) -> Self {
        self.strict_convergence = strict;
        self
    }
}

impl CentralityScorer for PageRankScorer {
    fn score(&self, matrix: &SimilarityMatrix) -> Result<CentralityScores> {
        let graph = CsrGraph::from_matrix(matrix);
        let result = self.pagerank.run(&graph);

        if !result.converged {
            if self.strict_convergence {
                return Err(SummarizeError::convergence_failure(
                    result.iterations,
                    result.delta,
                ));
            }
            #[cfg(feature = "tracing")]
            tracing::warn!(
                iterations = result.iterations,
                delta = result.delta,
                "pagerank hit iteration cap, using best estimate"
            );
        }

        Ok(CentralityScores::from_dense(
            result.scores,
            result.iterations,
            result.delta,
            result.converged,
        ))
    }
}
