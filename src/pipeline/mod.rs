//! Pipeline orchestration.
//!
//! - [`runner`]: groups records into documents and runs the similarity,
//!   scoring and ranking stages on each

pub mod runner;

pub use runner::{summarize_all, DocumentResult, SummarizationPipeline};
