//! Dependency graph construction and sub-word realignment.

mod adjacency;
mod merger;
mod realign;

pub use adjacency::AdjacencyMatrix;
pub use merger::{FailureEntry, FailureManifest, GraphMerger, MergeOutcome};
pub use realign::{realign, RealignConfig, SubwordGraph, SubwordTokenizer};
