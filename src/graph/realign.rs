//! Sub-word realignment of word-level adjacency matrices.
//!
//! Transformer tokenizers split words into sub-word pieces, so the word-level
//! graph has to be re-projected: every sub-token inherits the full
//! connectivity of the word it came from, verbatim. Sub-tokens of one word
//! therefore become fully mutually connected; this is a broadcast of the
//! word-level structure, not a finer-grained parse. Synthetic heterogeneous
//! nodes (e.g. polarity anchors) may be prepended with reserved indices.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::data::ExampleRecord;
use crate::error::{Error, Result};
use crate::graph::AdjacencyMatrix;

/// Deterministic, side-effect-free word → sub-token capability.
pub trait SubwordTokenizer {
    /// Split one word into its sub-word pieces, in order.
    fn tokenize(&self, word: &str) -> Vec<String>;
}

impl<F> SubwordTokenizer for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn tokenize(&self, word: &str) -> Vec<String> {
        self(word)
    }
}

/// Realignment settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RealignConfig {
    /// Labels of synthetic nodes prepended to the token sequence; their
    /// count determines the index offset of all word-derived positions.
    pub heterogeneous_node_labels: Vec<String>,
}

impl RealignConfig {
    /// No synthetic nodes.
    pub fn plain() -> Self {
        Self::default()
    }

    /// The polarity-anchor pair used by the heterogeneous variant.
    pub fn polarity_anchors() -> Self {
        Self {
            heterogeneous_node_labels: vec!["POS".to_string(), "NEG".to_string()],
        }
    }

    /// Number of prepended synthetic nodes.
    pub fn node_count(&self) -> usize {
        self.heterogeneous_node_labels.len()
    }
}

/// A realigned sub-word graph.
///
/// Owns no reference back to the word-level matrix; safe to cache per
/// (example, tokenizer-vocabulary) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubwordGraph {
    /// Heterogeneous labels followed by sub-tokens of left + aspect + right
    pub tokens: Vec<String>,
    /// For each position, the word-level index it was derived from
    /// (heterogeneous nodes map to themselves); monotonically non-decreasing
    pub tok2ori: Vec<usize>,
    /// Sub-word-level adjacency
    pub matrix: AdjacencyMatrix,
}

impl SubwordGraph {
    /// Output dimension: heterogeneous count + total sub-token count.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the graph has no positions.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Project a word-level matrix onto the sub-word tokenization of a record.
///
/// `word_matrix` must already account for the heterogeneous prefix: its size
/// must be at least `config.node_count() + record.word_count()` (see
/// [`AdjacencyMatrix::pad_to`]). A smaller matrix is an
/// [`Error::AlignmentOverflow`], never a silent truncation.
pub fn realign(
    word_matrix: &AdjacencyMatrix,
    record: &ExampleRecord,
    tokenizer: &dyn SubwordTokenizer,
    config: &RealignConfig,
) -> Result<SubwordGraph> {
    let offset = config.node_count();
    let mut tokens: Vec<String> = config.heterogeneous_node_labels.clone();
    let mut tok2ori: Vec<usize> = (0..offset).collect();

    let spans = [&record.text_left, &record.aspect, &record.text_right];
    let mut ori = offset;
    for span in spans {
        for word in span.iter() {
            let pieces = tokenizer.tokenize(word);
            if pieces.is_empty() {
                // A word with no pieces would vanish from the index map and
                // break the every-index-appears invariant.
                return Err(Error::AlignmentOverflow {
                    token_index: tokens.len(),
                    mapped: ori,
                    matrix_len: word_matrix.size(),
                });
            }
            for piece in pieces {
                tokens.push(piece);
                tok2ori.push(ori);
            }
            ori += 1;
        }
    }

    let m = tokens.len();
    for (pos, &mapped) in tok2ori.iter().enumerate() {
        if mapped >= word_matrix.size() {
            return Err(Error::AlignmentOverflow {
                token_index: pos,
                mapped,
                matrix_len: word_matrix.size(),
            });
        }
    }

    let mut matrix = Array2::<f32>::zeros((m, m));
    for a in 0..m {
        for b in 0..m {
            matrix[[a, b]] = word_matrix.get(tok2ori[a], tok2ori[b]);
        }
    }

    Ok(SubwordGraph {
        tokens,
        tok2ori,
        matrix: matrix.into(),
    })
}
