//! Standard PageRank algorithm
//!
//! Implements the classic PageRank with power iteration and proper
//! handling of dangling nodes.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;
use crate::types::SummarizerConfig;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold
    pub threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-6,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Take damping, iteration cap and threshold from a summarizer config
    pub fn from_config(config: &SummarizerConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            threshold: config.convergence_threshold,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Run weighted PageRank on a sentence graph.
    ///
    /// A graph without edges (every document of zero or one sentence, and any
    /// document whose sentences are pairwise dissimilar) scores uniformly and
    /// returns after zero iterations. Otherwise the estimate is returned even
    /// when the iteration cap is hit, with `converged = false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if graph.num_edges() == 0 {
            return PageRankResult::uniform(n);
        }

        let out_weight: Vec<f64> = (0..n as u32)
            .map(|node| graph.node_total_weight(node))
            .collect();
        let dangling = graph.dangling_nodes();

        let mut result = PageRankResult::new(vec![1.0 / n as f64; n], 0, f64::INFINITY, false);
        let mut next = vec![0.0; n];

        while result.iterations < self.max_iterations {
            result.delta = self.step(graph, &out_weight, &dangling, &result.scores, &mut next);
            result.iterations += 1;
            std::mem::swap(&mut result.scores, &mut next);

            if result.delta <= self.threshold {
                result.converged = true;
                break;
            }
        }

        // Mass is conserved up to rounding
        let sum: f64 = result.scores.iter().sum();
        if sum > 0.0 {
            result.scores.iter_mut().for_each(|s| *s /= sum);
        }

        result
    }

    /// One power-iteration step from `current` into `next`; returns the L1 delta.
    fn step(
        &self,
        graph: &CsrGraph,
        out_weight: &[f64],
        dangling: &[u32],
        current: &[f64],
        next: &mut [f64],
    ) -> f64 {
        let n = current.len() as f64;

        // Teleport mass plus the mass of sentences with no similar neighbor
        let dangling_mass: f64 = dangling.iter().map(|&d| current[d as usize]).sum();
        next.fill((1.0 - self.damping + self.damping * dangling_mass) / n);

        for (node, (&rank, &total)) in current.iter().zip(out_weight).enumerate() {
            if total > 0.0 {
                let share = self.damping * rank / total;
                for (neighbor, weight) in graph.neighbors(node as u32) {
                    next[neighbor as usize] += share * weight;
                }
            }
        }

        current
            .iter()
            .zip(next.iter())
            .map(|(old, new)| (old - new).abs())
            .sum()
    }
}
