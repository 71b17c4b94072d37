//! Pipeline runner: ranks every document of a sentence stream.
//!
//! [`SummarizationPipeline`] groups a flat stream of [`SentenceRecord`]s into
//! documents and, for each one, runs:
//!
//! 1. similarity matrix construction ([`SimilarityMatrixBuilder`])
//! 2. centrality scoring ([`CentralityScorer`], PageRank by default)
//! 3. importance ranking ([`SentenceRanker`])
//!
//! Documents are independent. A failing document is reported with its id and
//! the rest of the batch carries on.
//!
//! # Static dispatch
//!
//! The pipeline is generic over its scorer, so a custom [`CentralityScorer`]
//! is monomorphized in with no dynamic dispatch.

use crate::errors::{DocumentError, Result};
use crate::graph::builder::SimilarityMatrixBuilder;
use crate::summarizer::grouping::{group_contiguous, validate_document, DocumentGroup};
use crate::summarizer::ranker::SentenceRanker;
use crate::summarizer::scorer::{CentralityScorer, PageRankScorer};
use crate::types::{DocumentId, RankedDocument, SentenceRecord, SummarizerConfig};
use rayon::prelude::*;

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("pipeline_stage", stage = $name).entered();
    };
}

pub const STAGE_SIMILARITY: &str = "similarity";
pub const STAGE_SCORE: &str = "score";
pub const STAGE_RANK: &str = "rank";

/// Outcome of ranking one document.
pub type DocumentResult = std::result::Result<RankedDocument, DocumentError>;

/// Ranks the sentences of each document by centrality.
#[derive(Debug, Clone)]
pub struct SummarizationPipeline<S = PageRankScorer> {
    pub config: SummarizerConfig,
    pub matrix_builder: SimilarityMatrixBuilder,
    pub scorer: S,
    pub ranker: SentenceRanker,
}

impl Default for SummarizationPipeline<PageRankScorer> {
    fn default() -> Self {
        Self::with_valid_config(SummarizerConfig::default())
    }
}

impl SummarizationPipeline<PageRankScorer> {
    /// Pipeline with the default configuration and PageRank scoring
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline for a custom configuration.
    ///
    /// # Errors
    ///
    /// [`SummarizeError::InvalidConfig`](crate::errors::SummarizeError::InvalidConfig) if the configuration is invalid.
    pub fn from_config(config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SummarizerConfig) -> Self {
        Self {
            matrix_builder: SimilarityMatrixBuilder::new().with_parallel(config.parallel),
            scorer: PageRankScorer::from_config(&config),
            ranker: SentenceRanker::new(),
            config,
        }
    }
}

impl<S> SummarizationPipeline<S> {
    /// Swap in a different centrality scorer
    pub fn with_scorer<T: CentralityScorer>(self, scorer: T) -> SummarizationPipeline<T> {
        SummarizationPipeline {
            config: self.config,
            matrix_builder: self.matrix_builder,
            scorer,
            ranker: self.ranker,
        }
    }
}

impl<S: CentralityScorer + Sync> SummarizationPipeline<S> {
    /// Rank the sentences of a single document.
    ///
    /// `records` must all belong to `document_id`. Output keeps the input
    /// order; each record gains its importance.
    pub fn summarize(
        &self,
        document_id: DocumentId,
        records: Vec<SentenceRecord>,
    ) -> Result<RankedDocument> {
        if self.config.validate_indexes {
            validate_document(&records)?;
        }

        let matrix = {
            trace_stage!(STAGE_SIMILARITY);
            let embeddings: Vec<&[f32]> = records.iter().map(|r| r.embedding.as_slice()).collect();
            self.matrix_builder.build(&embeddings)?
        };

        let scores = {
            trace_stage!(STAGE_SCORE);
            // Scorer output follows matrix rows, the ranker looks up by index
            self.scorer
                .score(&matrix)?
                .keyed_by(records.iter().map(|r| r.index))?
        };

        let sentences = {
            trace_stage!(STAGE_RANK);
            self.ranker.rank(records, &scores)?
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            document_id = %document_id,
            sentences = sentences.len(),
            iterations = scores.iterations,
            converged = scores.converged,
            "ranked document"
        );

        Ok(RankedDocument::new(document_id, sentences))
    }

    /// Rank every document in a flat record stream.
    ///
    /// Records are grouped into contiguous runs of equal `document_id` (see
    /// [`group_contiguous`]); one result is returned per run, in input order.
    /// A failure affects only its own document.
    pub fn summarize_all(&self, records: Vec<SentenceRecord>) -> Vec<DocumentResult> {
        let groups = group_contiguous(records);

        #[cfg(feature = "tracing")]
        tracing::info!(
            documents = groups.len(),
            parallel = self.config.parallel,
            "summarizing documents"
        );

        if !self.config.parallel {
            return groups
                .into_iter()
                .map(|g| self.summarize_group(g))
                .collect();
        }

        let run = || {
            groups
                .into_par_iter()
                .map(|g| self.summarize_group(g))
                .collect::<Vec<_>>()
        };

        match self.config.build_thread_pool() {
            Ok(Some(pool)) => pool.install(run),
            Ok(None) => run(),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "falling back to the global thread pool");
                run()
            }
        }
    }

    /// Rank every document, dropping (and logging) the ones that fail.
    ///
    /// Bad input is logged as a warning. Internal errors, such as a scorer
    /// that leaves a sentence unscored, are logged as errors.
    pub fn summarize_ok(&self, records: Vec<SentenceRecord>) -> Vec<RankedDocument> {
        self.summarize_all(records)
            .into_iter()
            .filter_map(|result| match result {
                Ok(doc) => Some(doc),
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    if _err.source.is_internal() {
                        tracing::error!(
                            document_id = %_err.document_id,
                            error = %_err.source,
                            "skipping document after internal error"
                        );
                    } else {
                        tracing::warn!(
                            document_id = %_err.document_id,
                            error = %_err.source,
                            "skipping document"
                        );
                    }
                    None
                }
            })
            .collect()
    }

    fn summarize_group(&self, group: DocumentGroup) -> DocumentResult {
        let DocumentGroup {
            document_id,
            records,
        } = group;
        self.summarize(document_id, records)
            .map_err(|source| DocumentError::new(document_id, source))
    }
}

/// Rank a flat record stream with the default pipeline.
pub fn summarize_all(records: Vec<SentenceRecord>) -> Vec<DocumentResult> {
    SummarizationPipeline::new().summarize_all(records)
}
