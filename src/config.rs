//! Engine configuration: TOML parsing with serde defaults.
//!
//! Every field has a default, so an empty file (or no file at all, via
//! `EngineConfig::default()`) yields a working configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::ingest::DEFAULT_MIN_FRAGMENT_CHARS;

#[derive(Debug, Default, Deserialize, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub ingestion: IngestionConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IngestionConfig {
    /// Fragments at or below this length are discarded at ingestion.
    #[serde(default = "default_min_fragment_chars")]
    pub min_fragment_chars: usize,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            min_fragment_chars: default_min_fragment_chars(),
        }
    }
}

/// Artificial per-phase delays in milliseconds (perceived-progress UX).
#[derive(Debug, Deserialize, Clone)]
pub struct PacingConfig {
    #[serde(default = "default_interpret_ms")]
    pub interpret_ms: u64,
    #[serde(default = "default_retrieve_ms")]
    pub retrieve_ms: u64,
    #[serde(default = "default_analyze_ms")]
    pub analyze_ms: u64,
    #[serde(default = "default_hybrid_ms")]
    pub hybrid_ms: u64,
    #[serde(default = "default_generate_ms")]
    pub generate_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            interpret_ms: default_interpret_ms(),
            retrieve_ms: default_retrieve_ms(),
            analyze_ms: default_analyze_ms(),
            hybrid_ms: default_hybrid_ms(),
            generate_ms: default_generate_ms(),
        }
    }
}

fn default_min_fragment_chars() -> usize {
    DEFAULT_MIN_FRAGMENT_CHARS
}
fn default_interpret_ms() -> u64 {
    600
}
fn default_retrieve_ms() -> u64 {
    800
}
fn default_analyze_ms() -> u64 {
    800
}
fn default_hybrid_ms() -> u64 {
    1000
}
fn default_generate_ms() -> u64 {
    800
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: EngineConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }
}
