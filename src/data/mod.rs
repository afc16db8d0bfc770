//! Dataset records and persisted graph artifacts.

mod artifact;
mod record;

pub use artifact::{GraphArtifact, KeyScheme};
pub use record::{load_file, parse_lines, ExampleRecord, LoadedDataset, DEFAULT_PLACEHOLDER};
