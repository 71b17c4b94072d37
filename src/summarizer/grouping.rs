//! Document grouping
//!
//! Splits a flat stream of sentence records into per-document groups.
//!
//! Grouping only merges *adjacent* records with the same `document_id`; it
//! never sorts or re-partitions the input. Callers must hand over each
//! document's sentences as one contiguous run. If two documents are
//! interleaved, each run becomes its own, smaller group and nothing fails.

use crate::errors::{Result, SummarizeError};
use crate::types::{DocumentId, SentenceRecord};

/// The sentences of one document, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentGroup {
    pub document_id: DocumentId,
    pub records: Vec<SentenceRecord>,
}

impl DocumentGroup {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Partition `records` into runs of equal `document_id`.
///
/// Never produces an empty group.
pub fn group_contiguous(records: Vec<SentenceRecord>) -> Vec<DocumentGroup> {
    let mut groups: Vec<DocumentGroup> = Vec::new();

    for record in records {
        match groups.last_mut() {
            Some(group) if group.document_id == record.document_id => group.records.push(record),
            _ => groups.push(DocumentGroup {
                document_id: record.document_id,
                records: vec![record],
            }),
        }
    }

    groups
}

/// Check that a document's sentence indexes are exactly `0..n`, each once.
pub fn validate_document(records: &[SentenceRecord]) -> Result<()> {
    let n = records.len();
    let mut seen = vec![false; n];

    for record in records {
        if record.index >= n {
            return Err(SummarizeError::invalid_document(format!(
                "sentence index {} out of range for {} sentences",
                record.index, n
            )));
        }
        if std::mem::replace(&mut seen[record.index], true) {
            return Err(SummarizeError::invalid_document(format!(
                "duplicate sentence index {}",
                record.index
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(doc: u64, index: usize) -> SentenceRecord {
        SentenceRecord::new(doc, index, vec![1.0])
    }

    #[test]
    fn test_contiguous_runs() {
        let input = vec![
            record(1, 0),
            record(1, 1),
            record(1, 2),
            record(2, 0),
            record(2, 1),
        ];
        let groups = group_contiguous(input);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].document_id, DocumentId(1));
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[1].document_id, DocumentId(2));
        assert_eq!(groups[1].len(), 2);
        let indexes: Vec<_> = groups[0].records.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn test_interleaved_ids_are_not_merged() {
        let input = vec![record(1, 0), record(2, 0), record(1, 1)];
        let groups = group_contiguous(input);

        let ids: Vec<_> = groups.iter().map(|g| g.document_id.0).collect();
        assert_eq!(ids, vec![1, 2, 1]);
        assert!(groups.iter().all(|g| !g.is_empty()));
    }

    #[test]
    fn test_empty_input() {
        assert!(group_contiguous(Vec::new()).is_empty());
    }

    #[test]
    fn test_validate_document() {
        assert!(validate_document(&[record(1, 1), record(1, 0)]).is_ok());
        assert!(validate_document(&[]).is_ok());

        let err = validate_document(&[record(1, 0), record(1, 0)]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));

        let err = validate_document(&[record(1, 0), record(1, 2)]).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
