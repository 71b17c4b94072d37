//! Core types for sentrank
//!
//! This module defines the records flowing through the ranking engine and
//! the summarizer configuration.

use crate::errors::{Result, SummarizeError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Document identity
// ============================================================================

/// Identifier grouping the sentences of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DocumentId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// ============================================================================
// Sentence records
// ============================================================================

/// One sentence of one document, with its precomputed embedding.
///
/// Fields the engine does not know about are kept in `extra` and written back
/// out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    /// Document this sentence belongs to
    pub document_id: DocumentId,
    /// 0-based position of the sentence within its document
    pub index: usize,
    /// The sentence text
    #[serde(default)]
    pub text: String,
    /// Sentence embedding; every sentence of a document has the same length
    pub embedding: Vec<f32>,
    /// Opaque caller fields, passed through unchanged
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SentenceRecord {
    /// Create a new record with no text and no extra fields
    pub fn new(document_id: u64, index: usize, embedding: Vec<f32>) -> Self {
        Self {
            document_id: DocumentId(document_id),
            index,
            text: String::new(),
            embedding,
            extra: serde_json::Map::new(),
        }
    }

    /// Builder method: set the sentence text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder method: attach an opaque caller field
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// A sentence record annotated with its importance rank.
///
/// `importance` is 0 for the most important sentence. Sentences with the same
/// centrality score share the same importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSentenceRecord {
    #[serde(flatten)]
    pub record: SentenceRecord,
    pub importance: usize,
}

impl RankedSentenceRecord {
    pub fn new(record: SentenceRecord, importance: usize) -> Self {
        Self { record, importance }
    }

    /// Sentence index within the document
    pub fn index(&self) -> usize {
        self.record.index
    }
}

/// All ranked sentences of one document, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDocument {
    pub document_id: DocumentId,
    pub sentences: Vec<RankedSentenceRecord>,
}

impl RankedDocument {
    pub fn new(document_id: DocumentId, sentences: Vec<RankedSentenceRecord>) -> Self {
        Self {
            document_id,
            sentences,
        }
    }

    /// Number of sentences in the document
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Importance values in input order
    pub fn importances(&self) -> Vec<usize> {
        self.sentences.iter().map(|s| s.importance).collect()
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the summarization pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Damping factor for PageRank (typically 0.85)
    pub damping: f64,
    /// Maximum iterations for PageRank convergence
    pub max_iterations: usize,
    /// Convergence threshold on the L1 delta between iterations
    pub convergence_threshold: f64,
    /// Fail a document whose PageRank hits the iteration cap instead of
    /// returning the best estimate
    pub strict_convergence: bool,
    /// Rank documents (and similarity rows) in parallel
    pub parallel: bool,
    /// Thread limit for parallel work (`None` = Rayon default)
    pub max_threads: Option<usize>,
    /// Reject documents whose sentence indexes are not exactly `0..n`
    pub validate_indexes: bool,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-6,
            strict_convergence: false,
            parallel: true,
            max_threads: None,
            validate_indexes: true,
        }
    }
}

impl SummarizerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(SummarizeError::invalid_config(format!(
                "damping must be between 0 and 1, got {}",
                self.damping
            )));
        }

        if self.max_iterations == 0 {
            return Err(SummarizeError::invalid_config("max_iterations must be > 0"));
        }

        if self.convergence_threshold.is_nan() || self.convergence_threshold <= 0.0 {
            return Err(SummarizeError::invalid_config(
                "convergence_threshold must be > 0",
            ));
        }

        if self.max_threads == Some(0) {
            return Err(SummarizeError::invalid_config("max_threads must be > 0"));
        }

        Ok(())
    }

    /// Parse a config from JSON, filling unspecified fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder method: set damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Builder method: set max iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: set convergence threshold
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Builder method: require PageRank convergence
    pub fn with_strict_convergence(mut self, strict: bool) -> Self {
        self.strict_convergence = strict;
        self
    }

    /// Builder method: enable or disable parallel ranking
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builder method: limit the number of worker threads
    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = Some(max_threads);
        self
    }

    /// Builder method: enable or disable sentence index validation
    pub fn with_validate_indexes(mut self, validate: bool) -> Self {
        self.validate_indexes = validate;
        self
    }

    /// Build a scoped Rayon thread pool matching this config.
    ///
    /// Returns `Ok(None)` when no thread limit is set (use global pool).
    pub fn build_thread_pool(&self) -> Result<Option<rayon::ThreadPool>> {
        match self.max_threads {
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map(Some)
                .map_err(|e| SummarizeError::invalid_config(e.to_string())),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_validation() {
        let config = SummarizerConfig::default();
        assert!(config.validate().is_ok());

        let bad_config = SummarizerConfig::default().with_damping(1.5);
        assert!(bad_config.validate().is_err());

        let bad_config = SummarizerConfig::default().with_max_iterations(0);
        assert!(bad_config.validate().is_err());

        let bad_config = SummarizerConfig::default().with_convergence_threshold(0.0);
        assert!(bad_config.validate().is_err());

        let bad_config = SummarizerConfig::default().with_convergence_threshold(f64::NAN);
        assert!(bad_config.validate().is_err());

        let bad_config = SummarizerConfig::default().with_max_threads(0);
        assert!(bad_config.validate().is_err());
    }

    #[test]
    fn test_config_from_partial_json() {
        let cfg = SummarizerConfig::from_json(r#"{"damping": 0.9, "strict_convergence": true}"#)
            .unwrap();
        assert!((cfg.damping - 0.9).abs() < 1e-12);
        assert!(cfg.strict_convergence);
        assert_eq!(cfg.max_iterations, 100);
        assert!(cfg.parallel);
    }

    #[test]
    fn test_config_from_json_rejects_invalid() {
        let err = SummarizerConfig::from_json(r#"{"damping": 2.0}"#).unwrap_err();
        assert!(matches!(err, SummarizeError::InvalidConfig { .. }));
    }

    #[test]
    fn test_thread_pool_only_when_limited() {
        assert!(SummarizerConfig::default()
            .build_thread_pool()
            .unwrap()
            .is_none());
        let pool = SummarizerConfig::default()
            .with_max_threads(2)
            .build_thread_pool()
            .unwrap()
            .unwrap();
        assert_eq!(pool.current_num_threads(), 2);
    }

    #[test]
    fn test_record_keeps_extra_fields() {
        let value = json!({
            "document_id": 3,
            "index": 1,
            "text": "Rates rose again.",
            "embedding": [0.5, 0.5],
            "category": "business"
        });
        let record: SentenceRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.document_id, DocumentId(3));
        assert_eq!(record.extra.get("category"), Some(&json!("business")));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["category"], json!("business"));
        assert_eq!(back["document_id"], json!(3));
    }

    #[test]
    fn test_ranked_record_serializes_flat() {
        let record = SentenceRecord::new(1, 0, vec![1.0]).with_text("Hello.");
        let ranked = RankedSentenceRecord::new(record, 0);
        let value = serde_json::to_value(&ranked).unwrap();
        assert_eq!(value["importance"], json!(0));
        assert_eq!(value["text"], json!("Hello."));
        assert!(value.get("record").is_none());
    }
}
