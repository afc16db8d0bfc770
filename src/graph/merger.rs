//! Multi-backend graph construction over a dataset.
//!
//! Runs every configured parser backend over every example and fills one
//! [`GraphArtifact`] per backend. A backend failure on any example aborts
//! that build: a sparse artifact with missing keys would silently corrupt
//! positional alignment with per-example labels and text downstream.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info};

use crate::data::{load_file, ExampleRecord, GraphArtifact, KeyScheme, LoadedDataset};
use crate::error::{Error, Result};
use crate::graph::AdjacencyMatrix;
use crate::parser::DependencyParser;

/// One reported record-level failure.
#[derive(Debug, Clone, Serialize)]
pub struct FailureEntry {
    /// First-line number of the failed record
    pub key: usize,
    /// Backend the failure occurred in, if backend-specific
    pub backend: Option<String>,
    /// Rendered error
    pub error: String,
}

/// Final report of record-level failures in a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FailureManifest {
    pub entries: Vec<FailureEntry>,
}

impl FailureManifest {
    /// Collect the record-scoped failures out of an error list.
    pub fn from_errors<'a>(errors: impl IntoIterator<Item = &'a Error>) -> Self {
        let mut manifest = Self::default();
        for err in errors {
            manifest.push_record(err);
        }
        manifest
    }

    /// Whether the run had no record-level failures.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    fn push_record(&mut self, err: &Error) {
        if let Error::MalformedRecord { line, .. } = err {
            self.entries.push(FailureEntry {
                key: *line,
                backend: None,
                error: err.to_string(),
            });
        }
    }
}

/// Result of merging one dataset file.
#[derive(Debug)]
pub struct MergeOutcome {
    /// One artifact per configured backend, in backend order
    pub artifacts: Vec<GraphArtifact>,
    /// Record-level failures (malformed groups), never backend failures
    pub manifest: FailureManifest,
}

/// Builds per-backend artifacts from parsed records.
///
/// Adapters share no mutable state across examples; parser sessions may be
/// stateful internally but each `parse` call is logically independent.
pub struct GraphMerger {
    adapters: Vec<Box<dyn DependencyParser>>,
    key_scheme: KeyScheme,
}

impl GraphMerger {
    /// Create a merger over a set of backend adapters.
    pub fn new(adapters: Vec<Box<dyn DependencyParser>>) -> Self {
        Self {
            adapters,
            key_scheme: KeyScheme::default(),
        }
    }

    /// Select the artifact keying scheme.
    pub fn with_key_scheme(mut self, key_scheme: KeyScheme) -> Self {
        self.key_scheme = key_scheme;
        self
    }

    /// Backend names, in adapter order.
    pub fn backend_names(&self) -> Vec<String> {
        self.adapters
            .iter()
            .map(|a| a.backend_name().to_string())
            .collect()
    }

    /// Build one artifact per backend from a loaded dataset.
    ///
    /// Malformed records were already excluded at load time and are carried
    /// into the manifest; any adapter error is fatal to the whole call.
    pub fn build(&mut self, dataset: &LoadedDataset) -> Result<MergeOutcome> {
        let manifest = FailureManifest::from_errors(&dataset.malformed);

        let mut artifacts: Vec<GraphArtifact> = self
            .adapters
            .iter()
            .map(|a| GraphArtifact::new(a.backend_name(), self.key_scheme))
            .collect();

        for record in &dataset.records {
            let words = record.full_sentence();
            for (adapter, artifact) in self.adapters.iter_mut().zip(artifacts.iter_mut()) {
                let matrix = Self::build_one(adapter.as_mut(), record, &words)?;
                artifact.insert(record.key, matrix);
            }
        }

        info!(
            examples = dataset.records.len(),
            backends = artifacts.len(),
            skipped = manifest.entries.len(),
            "built graph artifacts"
        );
        Ok(MergeOutcome { artifacts, manifest })
    }

    fn build_one(
        adapter: &mut dyn DependencyParser,
        record: &ExampleRecord,
        words: &[String],
    ) -> Result<AdjacencyMatrix> {
        match adapter.parse(words) {
            Ok(heads) => Ok(AdjacencyMatrix::from_heads(&heads)),
            Err(err) => {
                error!(
                    key = record.key,
                    backend = adapter.backend_name(),
                    %err,
                    "aborting artifact build"
                );
                Err(err)
            }
        }
    }

    /// Load a dataset file, build all artifacts, and persist each one next
    /// to the source under the `<source>.<backend>.graph` convention.
    pub fn process_file(&mut self, path: impl AsRef<Path>) -> Result<(Vec<PathBuf>, FailureManifest)> {
        let path = path.as_ref();
        let dataset = load_file(path)?;
        let outcome = self.build(&dataset)?;

        let mut written = Vec::with_capacity(outcome.artifacts.len());
        for artifact in &outcome.artifacts {
            let out_path = GraphArtifact::path_for(path, &artifact.backend);
            artifact.save(&out_path)?;
            info!(path = %out_path.display(), examples = artifact.len(), "wrote artifact");
            written.push(out_path);
        }
        Ok((written, outcome.manifest))
    }
}
