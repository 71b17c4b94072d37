//! PageRank algorithms
//!
//! This module provides the power-iteration PageRank used to score sentence
//! centrality.

pub mod standard;

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Uniform scores over `n` nodes, reached without iterating.
    ///
    /// This is the exact answer for a graph with no edges, which includes
    /// every graph of zero or one node.
    pub fn uniform(n: usize) -> Self {
        let scores = if n == 0 {
            Vec::new()
        } else {
            vec![1.0 / n as f64; n]
        };
        Self::new(scores, 0, 0.0, true)
    }
}
