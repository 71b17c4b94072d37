//! Sentence graph in Compressed Sparse Row (CSR) form
//!
//! PageRank walks every node's outgoing edges once per iteration; CSR keeps
//! each node's edges in one contiguous slice.

use super::builder::SimilarityMatrix;

/// Weighted, directed sentence graph.
///
/// Node `i` is sentence `i`. Edge `i -> j` carries the similarity of `i` to
/// `j`; only positive similarities become edges.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of sentences
    pub num_nodes: usize,
    /// Node i's edges live at `row_ptr[i]..row_ptr[i + 1]`
    pub row_ptr: Vec<usize>,
    /// Target sentence of each edge
    pub col_idx: Vec<u32>,
    /// Similarity carried by each edge
    pub weights: Vec<f64>,
    /// Sum of each node's outgoing similarity
    pub total_weight: Vec<f64>,
}

impl CsrGraph {
    /// Convert a similarity matrix into CSR format.
    ///
    /// Zero entries (the diagonal included) and negative similarities add no
    /// edge. Edges of a row are stored in ascending target order.
    pub fn from_matrix(matrix: &SimilarityMatrix) -> Self {
        let mut graph = Self {
            num_nodes: matrix.len(),
            total_weight: Vec::with_capacity(matrix.len()),
            ..Self::default()
        };

        for (i, row) in matrix.rows().enumerate() {
            let edges = row
                .iter()
                .enumerate()
                .filter(|&(j, &weight)| j != i && weight > 0.0);

            let mut sum = 0.0;
            for (j, &weight) in edges {
                graph.col_idx.push(j as u32);
                graph.weights.push(weight);
                sum += weight;
            }
            graph.total_weight.push(sum);
            graph.row_ptr.push(graph.col_idx.len());
        }

        graph
    }

    /// Outgoing edges of `node` as `(target, similarity)` pairs
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let span = self.row_ptr[node as usize]..self.row_ptr[node as usize + 1];
        self.col_idx[span.clone()]
            .iter()
            .copied()
            .zip(self.weights[span].iter().copied())
    }

    /// Number of positive-similarity neighbors of `node`
    pub fn degree(&self, node: u32) -> usize {
        self.row_ptr[node as usize + 1] - self.row_ptr[node as usize]
    }

    /// Sum of the similarities on `node`'s outgoing edges
    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.total_weight[node as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Total number of directed edges
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Sentences without a single positive-similarity neighbor
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.degree(n) == 0)
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            total_weight: Vec::new(),
        }
    }
}
