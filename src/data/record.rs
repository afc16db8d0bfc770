//! Aspect-sentiment dataset records.
//!
//! Datasets follow a 3-line convention: a context line with a single `$T$`
//! placeholder marking the aspect position, the aspect term line, and a
//! polarity label line. The record key is the 0-based line number of the
//! group's first line, stepping by 3.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Default aspect placeholder marker.
pub const DEFAULT_PLACEHOLDER: &str = "$T$";

/// One (left-context, aspect, right-context) example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleRecord {
    /// Line number of the record's first line in the source file
    pub key: usize,
    /// Words left of the aspect
    pub text_left: Vec<String>,
    /// Aspect term words
    pub aspect: Vec<String>,
    /// Words right of the aspect
    pub text_right: Vec<String>,
    /// Raw polarity label line, kept for downstream consumers
    pub label: String,
}

impl ExampleRecord {
    /// Build a record from one 3-line group.
    ///
    /// `line` is the 0-based index of `context` in the source file.
    pub fn from_lines(line: usize, context: &str, aspect: &str, label: &str) -> Result<Self> {
        let marker_count = context.matches(DEFAULT_PLACEHOLDER).count();
        if marker_count != 1 {
            return Err(Error::MalformedRecord {
                line,
                reason: format!(
                    "expected exactly one '{}' placeholder, found {}",
                    DEFAULT_PLACEHOLDER, marker_count
                ),
            });
        }

        let (left, right) = context
            .split_once(DEFAULT_PLACEHOLDER)
            .ok_or_else(|| Error::MalformedRecord {
                line,
                reason: "placeholder split failed".to_string(),
            })?;

        Ok(Self {
            key: line,
            text_left: split_words(left),
            aspect: split_words(aspect),
            text_right: split_words(right),
            label: label.trim().to_string(),
        })
    }

    /// The full surface sentence: left + aspect + right, in word order.
    ///
    /// Matrix positions are positions in this concatenation, not in the
    /// original file layout.
    pub fn full_sentence(&self) -> Vec<String> {
        let mut words =
            Vec::with_capacity(self.text_left.len() + self.aspect.len() + self.text_right.len());
        words.extend(self.text_left.iter().cloned());
        words.extend(self.aspect.iter().cloned());
        words.extend(self.text_right.iter().cloned());
        words
    }

    /// Number of words in the full sentence.
    pub fn word_count(&self) -> usize {
        self.text_left.len() + self.aspect.len() + self.text_right.len()
    }
}

fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(|w| w.to_string()).collect()
}

/// Outcome of loading a dataset file: parsed records plus per-record
/// failures. Records are independent at this layer, so a malformed group is
/// reported and skipped rather than aborting the file.
#[derive(Debug, Default)]
pub struct LoadedDataset {
    /// Successfully parsed records, in file order
    pub records: Vec<ExampleRecord>,
    /// Malformed groups, keyed by first-line number
    pub malformed: Vec<Error>,
}

/// Parse dataset lines into records.
pub fn parse_lines(lines: &[String]) -> LoadedDataset {
    let mut out = LoadedDataset::default();
    let mut i = 0;
    while i < lines.len() {
        // A trailing blank line is not a truncated record.
        if i + 1 == lines.len() && lines[i].trim().is_empty() {
            break;
        }
        if i + 3 > lines.len() {
            warn!(line = i, "truncated record group at end of file");
            out.malformed.push(Error::MalformedRecord {
                line: i,
                reason: format!("group truncated to {} lines", lines.len() - i),
            });
            break;
        }
        match ExampleRecord::from_lines(i, &lines[i], &lines[i + 1], &lines[i + 2]) {
            Ok(record) => out.records.push(record),
            Err(err) => {
                warn!(line = i, %err, "skipping malformed record");
                out.malformed.push(err);
            }
        }
        i += 3;
    }
    out
}

/// Read and parse a dataset file.
pub fn load_file(path: impl AsRef<Path>) -> Result<LoadedDataset> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<String> = content.lines().map(|l| l.to_string()).collect();
    Ok(parse_lines(&lines))
}
