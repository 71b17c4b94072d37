//! Error types for sentrank
//!
//! Every failure is scoped to a single document. [`SummarizeError`] describes
//! what went wrong; [`DocumentError`] attaches the document it happened in so
//! a batch can skip it and carry on.

use crate::types::DocumentId;
use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SummarizeError>;

/// Main error type for sentrank
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummarizeError {
    /// Embeddings of one document do not share a dimensionality
    #[error("Dimension mismatch at sentence {index}: expected {expected}, found {found}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// An embedding has zero magnitude (or non-finite components), so cosine
    /// similarity is undefined
    #[error("Degenerate embedding at sentence {index}: zero or non-finite magnitude")]
    DegenerateVector { index: usize },

    /// PageRank did not converge and strict convergence was requested
    #[error("Convergence failure after {iterations} iterations (delta={delta:.6})")]
    ConvergenceFailure { iterations: usize, delta: f64 },

    /// The score map has no entry for a sentence (scorer/ranker wiring bug)
    #[error("Missing centrality score for sentence {index}")]
    MissingScore { index: usize },

    /// Sentence indexes of a document are not unique and contiguous
    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Reading or writing records failed
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl SummarizeError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(index: usize, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            index,
            expected,
            found,
        }
    }

    /// Create a degenerate vector error
    pub fn degenerate_vector(index: usize) -> Self {
        Self::DegenerateVector { index }
    }

    /// Create a convergence failure error
    pub fn convergence_failure(iterations: usize, delta: f64) -> Self {
        Self::ConvergenceFailure { iterations, delta }
    }

    /// Create a missing score error
    pub fn missing_score(index: usize) -> Self {
        Self::MissingScore { index }
    }

    /// Create an invalid document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Check if this error indicates non-convergence
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, Self::ConvergenceFailure { .. })
    }

    /// Check if this error is an internal invariant violation rather than
    /// bad input
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::MissingScore { .. })
    }
}

impl From<serde_json::Error> for SummarizeError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<std::io::Error> for SummarizeError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// A per-document failure, tagged with the document it belongs to.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("document {document_id}: {source}")]
pub struct DocumentError {
    pub document_id: DocumentId,
    #[source]
    pub source: SummarizeError,
}

impl DocumentError {
    pub fn new(document_id: DocumentId, source: SummarizeError) -> Self {
        Self {
            document_id,
            source,
        }
    }
}

impl From<DocumentError> for SummarizeError {
    fn from(err: DocumentError) -> Self {
        err.source
    }
}
