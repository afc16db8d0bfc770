//! # Dependency Graphs for Aspect-Based Sentiment Analysis
//!
//! This library turns raw aspect-sentiment sentences into graph-structured
//! numeric inputs for a neural classifier, and consumes those graphs in a
//! hybrid transformer/graph-convolution encoder.
//!
//! ## Features
//!
//! - Uniform adapter over external dependency parser backends, with eager
//!   token-count validation
//! - Symmetric word-level adjacency matrices with self-loops
//! - Per-backend persisted graph artifacts keyed by example
//! - Re-projection of word-level graphs onto sub-word tokenizations,
//!   with optional synthetic heterogeneous nodes
//! - Two-layer mean-aggregation GCN with self-attention and pooling
//!
//! ## Example
//!
//! ```rust
//! use aspect_gcn::{
//!     data::parse_lines,
//!     graph::GraphMerger,
//!     parser::{FnBackend, Head, ParserAdapter},
//! };
//!
//! fn main() -> anyhow::Result<()> {
//!     let lines: Vec<String> = ["I like $T$", "cats", "1"]
//!         .iter()
//!         .map(|s| s.to_string())
//!         .collect();
//!     let dataset = parse_lines(&lines);
//!
//!     // Everything attaches to the first word; stands in for a real parser.
//!     let backend = FnBackend::new("star", |ws: &[String]| {
//!         Ok((0..ws.len())
//!             .map(|i| if i == 0 { Head::Root } else { Head::Index(0) })
//!             .collect())
//!     });
//!     let mut merger = GraphMerger::new(vec![Box::new(ParserAdapter::new(backend))]);
//!     let outcome = merger.build(&dataset)?;
//!     assert_eq!(outcome.artifacts[0].get(0)?.size(), 3);
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod error;
pub mod graph;
pub mod model;
pub mod parser;
pub mod utils;

// Re-export main types
pub use data::{ExampleRecord, GraphArtifact, KeyScheme};
pub use error::{Error, Result};
pub use graph::{AdjacencyMatrix, GraphMerger, RealignConfig, SubwordGraph};
pub use model::{GcnEncoder, GraphConvolution};
pub use parser::{DependencyParser, Head, ParserAdapter, ParserBackend};
pub use utils::Config;
