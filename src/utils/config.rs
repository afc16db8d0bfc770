//! Configuration handling.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::parser::{DevicePreference, ParserConfig};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Dataset configuration
    pub dataset: DatasetConfig,
    /// Parser configuration
    pub parser: ParserSettings,
    /// Sub-word realignment configuration
    pub realign: RealignSettings,
    /// Model configuration
    pub model: ModelSettings,
}

impl Config {
    /// Load configuration from TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        Ok(config)
    }

    /// Save configuration to TOML file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Dataset file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Dataset files to process
    pub files: Vec<String>,
    /// Key examples densely (0..K-1) instead of by source line number
    pub dense_keys: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            dense_keys: false,
        }
    }
}

/// Parser backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserSettings {
    /// Backends to run, in artifact order
    pub backends: Vec<String>,
    /// Device hint for accelerated backends
    pub device: DevicePreference,
    /// Maximum sentence length in words
    pub max_words: usize,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            backends: vec!["spacy".to_string(), "stanza".to_string()],
            device: DevicePreference::Cpu,
            max_words: 128,
        }
    }
}

impl ParserSettings {
    /// Adapter-level view of these settings.
    pub fn adapter_config(&self) -> ParserConfig {
        ParserConfig {
            device: self.device,
            max_words: self.max_words,
        }
    }
}

/// Sub-word realignment configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RealignSettings {
    /// Synthetic node labels prepended to every sub-word sequence
    pub heterogeneous_node_labels: Vec<String>,
}

/// Model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Transformer hidden size per node
    pub hidden_dim: usize,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self { hidden_dim: 768 }
    }
}
