//! Similarity matrix construction
//!
//! Turns the embeddings of one document into a dense matrix of pairwise
//! cosine similarities. The matrix is the weighted adjacency the centrality
//! scorer runs on.

use crate::errors::{Result, SummarizeError};
use rayon::prelude::*;

/// Below this many sentences, building rows sequentially is faster
const PARALLEL_MIN_SENTENCES: usize = 64;

/// Dense n×n similarity matrix for one document, stored row-major.
///
/// `get(i, j)` is the similarity of sentence `i` to sentence `j`. The diagonal
/// is always 0: a sentence never endorses itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimilarityMatrix {
    size: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// An n×n matrix of zeros (no edges)
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    /// Build a matrix from explicit rows.
    ///
    /// Rows must be square; the diagonal is forced to 0.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(SummarizeError::dimension_mismatch(i, size, row.len()));
            }
            data.extend(row);
            data[i * size + i] = 0.0;
        }
        Ok(Self { size, data })
    }

    /// Number of sentences (rows)
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarity of sentence `i` to sentence `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    /// Row `i`: similarities of sentence `i` to every sentence
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.size..(i + 1) * self.size]
    }

    /// Iterate over rows in sentence order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.size).map(move |i| self.row(i))
    }
}

/// Cosine similarity of two vectors with precomputed L2 norms.
#[inline]
fn cosine_with_norms(a: &[f32], b: &[f32], norm_a: f64, norm_b: f64) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum();
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

fn l2_norm(v: &[f32]) -> f64 {
    v.iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum::<f64>()
        .sqrt()
}

/// Cosine similarity between two vectors (`1 - cosine distance`).
///
/// Returns `None` when the lengths differ or either vector has zero (or
/// non-finite) magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }
    let (norm_a, norm_b) = (l2_norm(a), l2_norm(b));
    if !is_usable_norm(norm_a) || !is_usable_norm(norm_b) {
        return None;
    }
    Some(cosine_with_norms(a, b, norm_a, norm_b))
}

#[inline]
fn is_usable_norm(norm: f64) -> bool {
    norm.is_finite() && norm > 0.0
}

/// Builds a [`SimilarityMatrix`] from sentence embeddings.
#[derive(Debug, Clone)]
pub struct SimilarityMatrixBuilder {
    /// Compute rows on the Rayon pool for large documents
    pub parallel: bool,
}

impl Default for SimilarityMatrixBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityMatrixBuilder {
    /// Create a sequential builder
    pub fn new() -> Self {
        Self { parallel: false }
    }

    /// Builder method: enable parallel row computation
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the pairwise similarity matrix.
    ///
    /// Every ordered pair `(i, j)` with `i != j` gets the cosine similarity of
    /// the two embeddings; self-pairs are never computed and stay 0.
    ///
    /// # Errors
    ///
    /// - [`SummarizeError::DimensionMismatch`] if an embedding's length differs
    ///   from the first one's. Vectors are never truncated or padded.
    /// - [`SummarizeError::DegenerateVector`] if an embedding has zero or
    ///   non-finite magnitude.
    pub fn build<V: AsRef<[f32]> + Sync>(&self, vectors: &[V]) -> Result<SimilarityMatrix> {
        let n = vectors.len();
        if n == 0 {
            return Ok(SimilarityMatrix::default());
        }

        let dim = vectors[0].as_ref().len();
        let mut norms = Vec::with_capacity(n);
        for (index, v) in vectors.iter().enumerate() {
            let v = v.as_ref();
            if v.len() != dim {
                return Err(SummarizeError::dimension_mismatch(index, dim, v.len()));
            }
            let norm = l2_norm(v);
            if !is_usable_norm(norm) {
                return Err(SummarizeError::degenerate_vector(index));
            }
            norms.push(norm);
        }

        let mut matrix = SimilarityMatrix::zeros(n);
        let fill_row = |(i, row): (usize, &mut [f64])| {
            let vi = vectors[i].as_ref();
            for (j, cell) in row.iter_mut().enumerate() {
                if i != j {
                    *cell = cosine_with_norms(vi, vectors[j].as_ref(), norms[i], norms[j]);
                }
            }
        };

        if self.parallel && n >= PARALLEL_MIN_SENTENCES {
            matrix.data.par_chunks_mut(n).enumerate().for_each(fill_row);
        } else {
            matrix.data.chunks_mut(n).enumerate().for_each(fill_row);
        }

        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vectors() -> Vec<Vec<f32>> {
        vec![
            vec![1.0, 0.0, 0.0],
            vec![0.9, 0.1, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.5, 0.5, 0.5],
        ]
    }

    #[test]
    fn test_diagonal_is_zero() {
        let matrix = SimilarityMatrixBuilder::new()
            .build(&sample_vectors())
            .unwrap();

        assert_eq!(matrix.len(), 4);
        for i in 0..matrix.len() {
            assert_eq!(matrix.get(i, i), 0.0);
        }
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let matrix = SimilarityMatrixBuilder::new()
            .build(&sample_vectors())
            .unwrap();

        for i in 0..4 {
            for j in 0..4 {
                assert!((matrix.get(i, j) - matrix.get(j, i)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_cosine_values() {
        let matrix = SimilarityMatrixBuilder::new()
            .build(&sample_vectors())
            .unwrap();

        // Orthogonal
        assert!(matrix.get(0, 2).abs() < 1e-12);
        // Identical direction scores 1 regardless of magnitude
        let scaled = vec![vec![1.0f32, 2.0], vec![2.0, 4.0]];
        let m = SimilarityMatrixBuilder::new().build(&scaled).unwrap();
        assert!((m.get(0, 1) - 1.0).abs() < 1e-9);
        // Opposite direction
        let opposite = vec![vec![1.0f32, 0.0], vec![-1.0, 0.0]];
        let m = SimilarityMatrixBuilder::new().build(&opposite).unwrap();
        assert!((m.get(0, 1) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_mismatch() {
        let vectors = vec![vec![1.0f32, 0.0], vec![1.0, 0.0, 0.0]];
        let err = SimilarityMatrixBuilder::new().build(&vectors).unwrap_err();
        assert_eq!(err, SummarizeError::dimension_mismatch(1, 2, 3));
    }

    #[test]
    fn test_zero_vector_is_degenerate() {
        let vectors = vec![vec![1.0f32, 0.0], vec![0.0, 0.0]];
        let err = SimilarityMatrixBuilder::new().build(&vectors).unwrap_err();
        assert_eq!(err, SummarizeError::degenerate_vector(1));
    }

    #[test]
    fn test_nan_vector_is_degenerate() {
        let vectors = vec![vec![f32::NAN, 1.0], vec![1.0, 0.0]];
        let err = SimilarityMatrixBuilder::new().build(&vectors).unwrap_err();
        assert_eq!(err, SummarizeError::degenerate_vector(0));
    }

    #[test]
    fn test_single_and_empty() {
        let m = SimilarityMatrixBuilder::new()
            .build(&[vec![0.3f32, 0.4]])
            .unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(0, 0), 0.0);

        let empty: Vec<Vec<f32>> = Vec::new();
        assert!(SimilarityMatrixBuilder::new().build(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let vectors: Vec<Vec<f32>> = (0..80)
            .map(|i| {
                let x = i as f32;
                vec![1.0 + x.sin(), x.cos(), (x * 0.3).sin() + 2.0]
            })
            .collect();

        let seq = SimilarityMatrixBuilder::new().build(&vectors).unwrap();
        let par = SimilarityMatrixBuilder::new()
            .with_parallel(true)
            .build(&vectors)
            .unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_from_rows_forces_zero_diagonal() {
        let m = SimilarityMatrix::from_rows(vec![vec![5.0, 0.2], vec![0.2, 5.0]]).unwrap();
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(1, 1), 0.0);
        assert_eq!(m.row(0), &[0.0, 0.2]);

        assert!(SimilarityMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).is_err());
    }

    #[test]
    fn test_cosine_similarity_fn() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), None);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), None);
        let sim = cosine_similarity(&[3.0, 4.0], &[3.0, 4.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
    }
}
