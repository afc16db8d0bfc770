//! Persisted graph dataset artifacts.
//!
//! One artifact holds the adjacency matrices of every example in one source
//! file, for one parser backend. The on-disk form is bincode; matrices must
//! round-trip value-identically.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::AdjacencyMatrix;

/// How examples are keyed inside an artifact.
///
/// The source format keys by the line number of the example's first line,
/// which other consumers may rely on; the dense scheme keys 0..K-1 and keeps
/// the line numbers as a side mapping instead of overloading one key for two
/// purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeyScheme {
    /// Key = line number of the record's first line (compatibility default)
    #[default]
    LineIndex,
    /// Key = dense 0..K-1 index, line numbers kept in `key_to_line`
    Dense,
}

/// All adjacency matrices for one (source file, parser backend) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphArtifact {
    /// Backend that produced the parses
    pub backend: String,
    /// Keying scheme in effect
    pub key_scheme: KeyScheme,
    /// Example key → word-level adjacency matrix
    pub graphs: BTreeMap<usize, AdjacencyMatrix>,
    /// Dense key → source line number; empty under `KeyScheme::LineIndex`
    pub key_to_line: Vec<usize>,
}

impl GraphArtifact {
    /// Create an empty artifact for a backend.
    pub fn new(backend: impl Into<String>, key_scheme: KeyScheme) -> Self {
        Self {
            backend: backend.into(),
            key_scheme,
            graphs: BTreeMap::new(),
            key_to_line: Vec::new(),
        }
    }

    /// Insert the matrix for a record, returning the key it was stored under.
    ///
    /// `line` is the record's first-line number; under the dense scheme the
    /// stored key is the insertion index and `line` goes to the side map.
    pub fn insert(&mut self, line: usize, matrix: AdjacencyMatrix) -> usize {
        match self.key_scheme {
            KeyScheme::LineIndex => {
                self.graphs.insert(line, matrix);
                line
            }
            KeyScheme::Dense => {
                let key = self.key_to_line.len();
                self.key_to_line.push(line);
                self.graphs.insert(key, matrix);
                key
            }
        }
    }

    /// Look up a matrix by key.
    pub fn get(&self, key: usize) -> Result<&AdjacencyMatrix> {
        self.graphs.get(&key).ok_or_else(|| Error::MissingKey {
            backend: self.backend.clone(),
            key,
        })
    }

    /// Source line number for a key, under either scheme.
    pub fn line_of(&self, key: usize) -> Option<usize> {
        match self.key_scheme {
            KeyScheme::LineIndex => self.graphs.contains_key(&key).then_some(key),
            KeyScheme::Dense => self.key_to_line.get(key).copied(),
        }
    }

    /// Number of stored examples.
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Whether the artifact is empty.
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Conventional artifact path: `<source>.<backend>.graph`.
    pub fn path_for(source: impl AsRef<Path>, backend: &str) -> PathBuf {
        let source = source.as_ref();
        let mut name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        name.push('.');
        name.push_str(backend);
        name.push_str(".graph");
        source.with_file_name(name)
    }

    /// Save to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = bincode::serialize(self)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Load from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path)?;
        let artifact = bincode::deserialize(&bytes)?;
        Ok(artifact)
    }
}
