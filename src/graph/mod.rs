//! Graph construction and representation
//!
//! This module builds the sentence similarity matrix and its sparse
//! adjacency view for PageRank.

pub mod builder;
pub mod csr;
