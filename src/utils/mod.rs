//! Utility module.

mod config;

pub use config::{Config, DatasetConfig, ModelSettings, ParserSettings, RealignSettings};
