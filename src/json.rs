//! JSON interface for sentence streams and ranked documents
//!
//! Input is JSON Lines: one [`SentenceRecord`] object per line, documents in
//! contiguous runs. Output is one pretty-printed JSON array per document,
//! with the embedding dropped.

use crate::errors::{Result, SummarizeError};
use crate::types::{DocumentId, RankedDocument, RankedSentenceRecord, SentenceRecord};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Field names written by [`write_document`]; pass-through fields may not use them.
pub const RESERVED_FIELDS: [&str; 5] = ["document_id", "index", "text", "embedding", "importance"];

/// Read sentence records from JSON Lines. Blank lines are skipped.
///
/// A record carrying a field named `importance` is rejected, since the output
/// would then hold that key twice.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<SentenceRecord>> {
    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: SentenceRecord = serde_json::from_str(&line).map_err(|e| {
            SummarizeError::serialization(format!("line {}: {}", line_no + 1, e))
        })?;
        if let Some(key) = record.extra.keys().find(|k| is_reserved(k)) {
            return Err(SummarizeError::serialization(format!(
                "line {}: field `{}` is reserved",
                line_no + 1,
                key
            )));
        }
        records.push(record);
    }
    Ok(records)
}

fn is_reserved(key: &str) -> bool {
    RESERVED_FIELDS.contains(&key)
}

/// Read sentence records from a JSON Lines file
pub fn read_records_file(path: impl AsRef<Path>) -> Result<Vec<SentenceRecord>> {
    let file = File::open(path)?;
    read_records(BufReader::new(file))
}

/// Output view of a ranked sentence: everything but the embedding.
#[derive(Debug, Serialize)]
pub struct OutputSentence<'a> {
    pub document_id: DocumentId,
    pub index: usize,
    pub text: &'a str,
    #[serde(flatten)]
    pub extra: PassThrough<'a>,
    pub importance: usize,
}

/// Pass-through fields of a record, minus any that shadow a reserved name.
#[derive(Debug, Clone, Copy)]
pub struct PassThrough<'a>(pub &'a serde_json::Map<String, serde_json::Value>);

impl Serialize for PassThrough<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.0.iter().filter(|(k, _)| !is_reserved(k)) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'a> From<&'a RankedSentenceRecord> for OutputSentence<'a> {
    fn from(ranked: &'a RankedSentenceRecord) -> Self {
        Self {
            document_id: ranked.record.document_id,
            index: ranked.record.index,
            text: &ranked.record.text,
            extra: PassThrough(&ranked.record.extra),
            importance: ranked.importance,
        }
    }
}

/// Write a ranked document as a pretty JSON array (2-space indent).
pub fn write_document<W: Write>(mut writer: W, document: &RankedDocument) -> Result<()> {
    let sentences: Vec<OutputSentence<'_>> =
        document.sentences.iter().map(OutputSentence::from).collect();
    serde_json::to_writer_pretty(&mut writer, &sentences)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write a ranked document to `<dir>/<document_id>.json`, returning the path.
pub fn write_document_to_dir(dir: impl AsRef<Path>, document: &RankedDocument) -> Result<PathBuf> {
    let path = dir
        .as_ref()
        .join(format!("{}.json", document.document_id));
    let mut writer = BufWriter::new(File::create(&path)?);
    write_document(&mut writer, document)?;
    writer.flush()?;
    Ok(path)
}
