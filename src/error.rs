//! Error types for the aspect-gcn library.

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Parser returned a different number of heads than input words.
    ///
    /// Downstream indexing depends on exact 1:1 alignment between the
    /// whitespace split and the parse, so this is checked eagerly and is
    /// fatal to the enclosing artifact build.
    #[error("backend '{backend}' returned {actual} heads for {expected} words")]
    TokenCountMismatch {
        backend: String,
        expected: usize,
        actual: usize,
    },

    /// Parser returned a head index outside the sentence.
    #[error("backend '{backend}' gave word {index} head {head}, sentence has {len} words")]
    HeadOutOfRange {
        backend: String,
        index: usize,
        head: usize,
        len: usize,
    },

    /// Sentence exceeds the configured word cap.
    #[error("sentence has {len} words, configured maximum is {max}")]
    SentenceTooLong { len: usize, max: usize },

    /// A sub-word index map references a word-level matrix index out of
    /// bounds (mis-sized heterogeneous prefix, or a tokenizer that produced
    /// zero pieces for a word).
    #[error("sub-token {token_index} maps to word index {mapped}, matrix has {matrix_len} rows")]
    AlignmentOverflow {
        token_index: usize,
        mapped: usize,
        matrix_len: usize,
    },

    /// A dataset line group is truncated or its context line does not
    /// contain exactly one aspect placeholder.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Requested artifact key is absent.
    #[error("artifact for backend '{backend}' has no entry for key {key}")]
    MissingKey { backend: String, key: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact serialization/deserialization error
    #[error("artifact error: {0}")]
    Artifact(#[from] bincode::Error),

    /// Configuration file error
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the failure is scoped to a single record rather than the
    /// whole artifact build.
    pub fn is_record_scoped(&self) -> bool {
        matches!(self, Error::MalformedRecord { .. })
    }
}
