//! Importance ranking
//!
//! Converts centrality scores into integer importance ranks, 0 being the
//! most important sentence.
//!
//! A sentence's importance is the position of the *first* entry equal to its
//! score in the scores sorted high to low. Sentences with exactly the same
//! score therefore share a rank, and the next distinct score skips past them:
//! scores `[0.5, 0.5, 0.1]` rank as `[0, 0, 2]`.

use super::scorer::CentralityScores;
use crate::errors::{Result, SummarizeError};
use crate::types::{RankedSentenceRecord, SentenceRecord};

/// Importance rank of every score in `scores`, in input order.
pub fn rank_scores(scores: &[f64]) -> Vec<usize> {
    let mut sorted_desc = scores.to_vec();
    sorted_desc.sort_by(|a, b| {
        b.partial_cmp(a)
            .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
    });

    scores
        .iter()
        .map(|score| {
            sorted_desc
                .iter()
                .position(|s| s == score)
                // NaN never equals itself; it ranks after every real score
                .unwrap_or_else(|| sorted_desc.iter().filter(|s| !s.is_nan()).count())
        })
        .collect()
}

/// Attaches importance ranks to sentence records.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceRanker;

impl SentenceRanker {
    pub fn new() -> Self {
        Self
    }

    /// Rank `records` by their scores.
    ///
    /// Output has the same length and order as `records`; only `importance`
    /// is added. Each record is looked up by its `index`.
    ///
    /// # Errors
    ///
    /// [`SummarizeError::MissingScore`] if a record's index has no score.
    pub fn rank(
        &self,
        records: Vec<SentenceRecord>,
        scores: &CentralityScores,
    ) -> Result<Vec<RankedSentenceRecord>> {
        let scores_seq = records
            .iter()
            .map(|r| {
                scores
                    .get(r.index)
                    .ok_or_else(|| SummarizeError::missing_score(r.index))
            })
            .collect::<Result<Vec<f64>>>()?;

        let importance = rank_scores(&scores_seq);

        Ok(records
            .into_iter()
            .zip(importance)
            .map(|(record, importance)| RankedSentenceRecord::new(record, importance))
            .collect())
    }
}
