//! # sentrank
//!
//! Graph-based extractive summarization over precomputed sentence embeddings.
//!
//! Each document's sentences become nodes of a similarity graph (pairwise
//! cosine similarity of their embeddings). PageRank over that graph gives
//! every sentence a centrality score, and the scores are turned into an
//! importance rank: 0 for the most central sentence, shared by ties.
//!
//! ## Features
//!
//! - **Deterministic**: identical input always yields identical ranks
//! - **Batch-friendly**: documents are ranked independently, in parallel, and
//!   one bad document never aborts the batch
//! - **Pluggable**: swap in any [`CentralityScorer`]
//!
//! ## Example
//!
//! ```
//! use sentrank::{SentenceRecord, SummarizationPipeline};
//!
//! let records = vec![
//!     SentenceRecord::new(1, 0, vec![1.0, 0.1]),
//!     SentenceRecord::new(1, 1, vec![0.9, 0.2]),
//!     SentenceRecord::new(1, 2, vec![0.1, 1.0]),
//! ];
//!
//! let results = SummarizationPipeline::new().summarize_all(records);
//! let document = results[0].as_ref().unwrap();
//! assert_eq!(document.len(), 3);
//! assert_eq!(document.sentences[2].importance, 2);
//! ```

pub mod errors;
pub mod graph;
pub mod json;
pub mod pagerank;
pub mod pipeline;
pub mod summarizer;
pub mod types;

// Re-export commonly used types
pub use errors::{DocumentError, Result, SummarizeError};
pub use types::{
    DocumentId, RankedDocument, RankedSentenceRecord, SentenceRecord, SummarizerConfig,
};

// Re-export main functionality
pub use graph::{
    builder::{cosine_similarity, SimilarityMatrix, SimilarityMatrixBuilder},
    csr::CsrGraph,
};
pub use pagerank::{standard::StandardPageRank, PageRankResult};
pub use pipeline::{summarize_all, DocumentResult, SummarizationPipeline};
pub use summarizer::{
    grouping::{group_contiguous, validate_document, DocumentGroup},
    ranker::{rank_scores, SentenceRanker},
    scorer::{CentralityScorer, CentralityScores, PageRankScorer},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
