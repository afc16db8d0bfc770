//! CLI for dataset checking and graph artifact inspection.
//!
//! Parser backends are external collaborators plugged in through the
//! library API; the binary covers the surrounding plumbing: validating
//! dataset files and inspecting persisted artifacts.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use aspect_gcn::data::{load_file, GraphArtifact};
use aspect_gcn::graph::FailureManifest;
use aspect_gcn::utils::Config;

#[derive(Parser)]
#[command(name = "aspect-gcn")]
#[command(about = "Dependency graph tooling for aspect-based sentiment analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse dataset files and report malformed records
    Check {
        /// Dataset files; defaults to the configured list
        files: Vec<String>,
    },

    /// Print statistics and invariant checks for a graph artifact
    Inspect {
        /// Artifact path (e.g. train.spacy.graph)
        path: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = if std::path::Path::new(&cli.config).exists() {
        Config::from_file(&cli.config)?
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Check { files } => {
            let files = if files.is_empty() {
                config.dataset.files.clone()
            } else {
                files
            };
            for file in files {
                let dataset = load_file(&file)?;
                info!(
                    file = %file,
                    records = dataset.records.len(),
                    malformed = dataset.malformed.len(),
                    "checked dataset"
                );
                let manifest = FailureManifest::from_errors(&dataset.malformed);
                if !manifest.is_clean() {
                    println!("{}", serde_json::to_string_pretty(&manifest)?);
                }
            }
        }
        Commands::Inspect { path } => {
            let artifact = GraphArtifact::load(&path)?;
            println!("backend:   {}", artifact.backend);
            println!("examples:  {}", artifact.len());
            let mut asymmetric = 0usize;
            let mut max_words = 0usize;
            for matrix in artifact.graphs.values() {
                max_words = max_words.max(matrix.size());
                if !matrix.is_symmetric() {
                    asymmetric += 1;
                }
            }
            println!("max words: {max_words}");
            println!("asymmetric matrices: {asymmetric}");
        }
    }

    Ok(())
}
