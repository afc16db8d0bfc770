//! Dependency parser adapters.
//!
//! External syntactic parsers (spaCy, stanza, ...) are modelled as sessions
//! implementing [`ParserBackend`]: given a whitespace-tokenized sentence they
//! return one head per word. [`ParserAdapter`] wraps a session and enforces
//! the alignment contract before any head list reaches the graph builder.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Syntactic head of a word in a dependency parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Head {
    /// The word is a root of the parse tree.
    Root,
    /// Index of the governing word.
    Index(usize),
}

/// Device preference for accelerated backends. A hint, not a correctness
/// requirement; backends may ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DevicePreference {
    /// Run on CPU
    #[default]
    Cpu,
    /// Prefer GPU when the backend supports it
    Gpu,
}

/// Adapter-level parser settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Device hint forwarded to the backend
    pub device: DevicePreference,
    /// Maximum sentence length in words; bounds N×N matrix allocation
    pub max_words: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            device: DevicePreference::Cpu,
            max_words: 128,
        }
    }
}

/// A stateful parser session owned by the caller.
///
/// Sessions are constructed explicitly (model load) and released on drop.
/// They must treat the given whitespace split as authoritative and must not
/// leak context between calls; each `heads` invocation is logically
/// independent. Sessions require external synchronization if shared across
/// concurrent workers.
pub trait ParserBackend {
    /// Backend identifier, used for artifact naming and error context.
    fn name(&self) -> &str;

    /// Return the head of each word, in word order.
    fn heads(&mut self, words: &[String]) -> Result<Vec<Head>>;

    /// Forward a device hint to the backend. Default: ignored.
    fn set_device(&mut self, _device: DevicePreference) {}
}

/// Backend built from a closure; the seam for plugging in external engines.
pub struct FnBackend<F> {
    name: String,
    f: F,
}

impl<F> FnBackend<F>
where
    F: FnMut(&[String]) -> Result<Vec<Head>>,
{
    /// Create a named closure backend.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> ParserBackend for FnBackend<F>
where
    F: FnMut(&[String]) -> Result<Vec<Head>>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn heads(&mut self, words: &[String]) -> Result<Vec<Head>> {
        (self.f)(words)
    }
}

/// Validating wrapper around a parser session.
///
/// All error cases are checked eagerly, per word-count alignment being an
/// assertion-level invariant for everything downstream.
pub struct ParserAdapter<B: ParserBackend> {
    backend: B,
    config: ParserConfig,
}

impl<B: ParserBackend> ParserAdapter<B> {
    /// Wrap a session with default settings.
    pub fn new(mut backend: B) -> Self {
        let config = ParserConfig::default();
        backend.set_device(config.device);
        Self { backend, config }
    }

    /// Wrap a session with explicit settings.
    pub fn with_config(mut backend: B, config: ParserConfig) -> Self {
        backend.set_device(config.device);
        Self { backend, config }
    }

    /// Name of the wrapped backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Parse a whitespace-tokenized sentence into a validated head list.
    pub fn parse(&mut self, words: &[String]) -> Result<Vec<Head>> {
        if words.len() > self.config.max_words {
            return Err(Error::SentenceTooLong {
                len: words.len(),
                max: self.config.max_words,
            });
        }

        let heads = self.backend.heads(words)?;
        if heads.len() != words.len() {
            return Err(Error::TokenCountMismatch {
                backend: self.backend.name().to_string(),
                expected: words.len(),
                actual: heads.len(),
            });
        }
        for (i, head) in heads.iter().enumerate() {
            if let Head::Index(h) = head {
                if *h >= words.len() {
                    return Err(Error::HeadOutOfRange {
                        backend: self.backend.name().to_string(),
                        index: i,
                        head: *h,
                        len: words.len(),
                    });
                }
            }
        }
        Ok(heads)
    }

    /// Release the underlying session.
    pub fn into_backend(self) -> B {
        self.backend
    }
}

/// Object-safe adapter facade so the merger can mix backend types.
pub trait DependencyParser {
    /// Backend identifier.
    fn backend_name(&self) -> &str;
    /// Validated parse, see [`ParserAdapter::parse`].
    fn parse(&mut self, words: &[String]) -> Result<Vec<Head>>;
}

impl<B: ParserBackend> DependencyParser for ParserAdapter<B> {
    fn backend_name(&self) -> &str {
        self.backend.name()
    }

    fn parse(&mut self, words: &[String]) -> Result<Vec<Head>> {
        ParserAdapter::parse(self, words)
    }
}
