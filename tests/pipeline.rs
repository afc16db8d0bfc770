//! End-to-end pipeline: dataset file → per-backend artifacts → sub-word
//! realignment → graph convolution encoder.

use std::io::Write;

use ndarray::{Array1, Array2};
use tempfile::tempdir;

use aspect_gcn::data::GraphArtifact;
use aspect_gcn::graph::{realign, GraphMerger, RealignConfig};
use aspect_gcn::model::{EncoderConfig, GcnEncoder};
use aspect_gcn::parser::{DependencyParser, FnBackend, Head, ParserAdapter};
use aspect_gcn::Result;

/// Word i attaches to word i-1; word 0 is the root.
fn chain_heads(words: &[String]) -> Result<Vec<Head>> {
    Ok((0..words.len())
        .map(|i| if i == 0 { Head::Root } else { Head::Index(i - 1) })
        .collect())
}

/// Every word attaches to word 0.
fn star_heads(words: &[String]) -> Result<Vec<Head>> {
    Ok((0..words.len())
        .map(|i| if i == 0 { Head::Root } else { Head::Index(0) })
        .collect())
}

/// Words longer than 4 characters split into 4-character chunks, the later
/// chunks prefixed with "##".
fn wordpiece(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() <= 4 {
        return vec![word.to_string()];
    }
    chars
        .chunks(4)
        .enumerate()
        .map(|(i, chunk)| {
            let piece: String = chunk.iter().collect();
            if i == 0 {
                piece
            } else {
                format!("##{piece}")
            }
        })
        .collect()
}

fn adapters() -> Vec<Box<dyn DependencyParser>> {
    vec![
        Box::new(ParserAdapter::new(FnBackend::new("chain", chain_heads))),
        Box::new(ParserAdapter::new(FnBackend::new("star", star_heads))),
    ]
}

#[test]
fn dataset_to_fused_feature() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("train");
    let mut f = std::fs::File::create(&data_path).unwrap();
    write!(
        f,
        "the $T$ was wonderful tonight\nfish tacos\n1\n$T$ crashed again\nmy expensive laptop\n-1\n"
    )
    .unwrap();
    drop(f);

    // Build and persist one artifact per backend.
    let mut merger = GraphMerger::new(adapters());
    let (written, manifest) = merger.process_file(&data_path).unwrap();
    assert!(manifest.is_clean());
    assert_eq!(written.len(), 2);

    // Reload the chain-backend artifact and pick the second example
    // ("my expensive laptop crashed again", keyed by line 3).
    let artifact = GraphArtifact::load(&written[0]).unwrap();
    assert_eq!(artifact.backend, "chain");
    let word_matrix = artifact.get(3).unwrap();
    assert_eq!(word_matrix.size(), 5);
    assert!(word_matrix.is_symmetric());
    for i in 0..5 {
        assert_eq!(word_matrix.get(i, i), 1.0);
    }
    // Chain parse: 4 non-root edges, 8 symmetric entries.
    assert_eq!(word_matrix.edge_entry_count(), 8);

    // Realign onto the sub-word tokenization.
    let records = aspect_gcn::data::load_file(&data_path).unwrap().records;
    let record = &records[1];
    let graph = realign(word_matrix, record, &wordpiece, &RealignConfig::plain()).unwrap();
    // my(1) + expensive(3) + laptop(2) + crashed(2) + again(2) = 10 pieces
    assert_eq!(graph.len(), 10);
    assert_eq!(graph.matrix.size(), 10);
    assert!(graph.matrix.is_symmetric());
    // Pieces of "expensive" (positions 1..=3) are fully mutually connected.
    assert_eq!(graph.matrix.get(1, 3), 1.0);
    assert_eq!(graph.matrix.get(2, 3), 1.0);

    // Feed the sub-word graph through the encoder.
    let dim = 16;
    let encoder = GcnEncoder::new(EncoderConfig { hidden_dim: dim });
    let hidden = Array2::<f32>::ones((graph.len(), dim));
    let adj = graph.matrix.clone().into_inner();
    let pooled = Array1::<f32>::zeros(dim);
    let fused = encoder.forward(&hidden, &adj, &pooled);
    assert_eq!(fused.len(), 2 * dim);
    assert!(fused.iter().all(|v| v.is_finite()));
}

#[test]
fn heterogeneous_nodes_flow_through_pipeline() {
    let lines: Vec<String> = ["I like $T$", "fish tacos", "1"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let dataset = aspect_gcn::data::parse_lines(&lines);

    let mut merger = GraphMerger::new(vec![Box::new(ParserAdapter::new(FnBackend::new(
        "chain",
        chain_heads,
    )))]);
    let outcome = merger.build(&dataset).unwrap();
    let word_matrix = outcome.artifacts[0].get(0).unwrap();

    let config = RealignConfig::polarity_anchors();
    let padded = word_matrix.pad_to(word_matrix.size() + config.node_count(), config.node_count());
    let graph = realign(&padded, &dataset.records[0], &wordpiece, &config).unwrap();

    // POS NEG I like fish taco ##s → 7 positions, anchors detached.
    assert_eq!(graph.len(), 7);
    assert_eq!(graph.tokens[0], "POS");
    assert_eq!(graph.matrix.get(0, 0), 1.0);
    for j in 1..graph.len() {
        assert_eq!(graph.matrix.get(0, j), 0.0);
    }
    // Word edges survive the anchor shift: like ↔ fish under the chain parse.
    assert_eq!(graph.matrix.get(3, 4), 1.0);
}

#[test]
fn backend_failure_leaves_no_partial_artifact_file() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("train");
    let mut f = std::fs::File::create(&data_path).unwrap();
    write!(f, "I like $T$\ncats\n1\n").unwrap();
    drop(f);

    let dropping = Box::new(ParserAdapter::new(FnBackend::new(
        "dropping",
        |ws: &[String]| Ok(vec![Head::Root; ws.len() - 1]),
    )));
    let mut merger = GraphMerger::new(vec![dropping]);
    assert!(merger.process_file(&data_path).is_err());
    assert!(!GraphArtifact::path_for(&data_path, "dropping").exists());
}
