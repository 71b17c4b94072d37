//! Summarization components
//!
//! Scores sentence centrality on the similarity graph, turns scores into
//! importance ranks, and splits record streams into documents.

pub mod grouping;
pub mod ranker;
pub mod scorer;
