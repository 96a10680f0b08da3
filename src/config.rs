// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for paradiff
//!
//! Loads configuration from .paradiffrc.toml in current directory or ~/.config/paradiff/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::diff::{
    CompareConfig, MatchStrategy, DEFAULT_CRITICAL_KEYWORDS, DEFAULT_MOVE_DETECTION_THRESHOLD,
    DEFAULT_MOVE_DISTANCE, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_UNCHANGED_THRESHOLD,
};
use crate::embedding::DEFAULT_HASHING_DIM;

const CONFIG_FILE_NAME: &str = ".paradiffrc.toml";

/// Output format for reports (mirrored from cli for library use)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOutputFormat {
    #[default]
    Text,
    Json,
}

/// Embedding provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderType {
    Command,
    #[default]
    Builtin,
    Hashing,
}

impl std::str::FromStr for EmbeddingProviderType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "command" | "cmd" => Ok(EmbeddingProviderType::Command),
            "builtin" | "fastembed" => Ok(EmbeddingProviderType::Builtin),
            "hashing" | "hash" => Ok(EmbeddingProviderType::Hashing),
            _ => Err(format!("Unknown embedding provider: {}", s)),
        }
    }
}

/// Comparison configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompareSection {
    /// Minimum similarity for two paragraphs to be paired (0.0-1.0]
    pub similarity_threshold: Option<f32>,
    /// Minimum similarity for a far-apart pair to count as moved
    pub move_detection_threshold: Option<f32>,
    /// Pairs scoring above this are unchanged
    pub unchanged_threshold: Option<f32>,
    /// Largest positional shift that is not a move
    pub move_distance: Option<usize>,
    /// Keywords that make any change critical
    pub critical_keywords: Option<Vec<String>>,
    /// Matching strategy (optimal, greedy)
    pub strategy: Option<MatchStrategy>,
}

impl CompareSection {
    /// Get similarity threshold (defaults to 0.75)
    pub fn similarity_threshold(&self) -> f32 {
        self.similarity_threshold.unwrap_or(DEFAULT_SIMILARITY_THRESHOLD)
    }

    /// Get move detection threshold (defaults to 0.85)
    pub fn move_detection_threshold(&self) -> f32 {
        self.move_detection_threshold.unwrap_or(DEFAULT_MOVE_DETECTION_THRESHOLD)
    }

    /// Get unchanged threshold (defaults to 0.95)
    pub fn unchanged_threshold(&self) -> f32 {
        self.unchanged_threshold.unwrap_or(DEFAULT_UNCHANGED_THRESHOLD)
    }

    /// Get move distance (defaults to 2)
    pub fn move_distance(&self) -> usize {
        self.move_distance.unwrap_or(DEFAULT_MOVE_DISTANCE)
    }

    /// Get critical keywords (defaults to the built-in list)
    pub fn critical_keywords(&self) -> Vec<String> {
        match &self.critical_keywords {
            Some(keywords) => keywords.clone(),
            None => DEFAULT_CRITICAL_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }

    /// Get matching strategy (defaults to Optimal)
    pub fn strategy(&self) -> MatchStrategy {
        self.strategy.unwrap_or_default()
    }

    /// Merge CLI overrides with config (CLI wins)
    pub fn resolve(&self, overrides: &CompareOverrides) -> CompareConfig {
        CompareConfig {
            similarity_threshold: overrides
                .similarity_threshold
                .unwrap_or_else(|| self.similarity_threshold()),
            move_detection_threshold: overrides
                .move_detection_threshold
                .unwrap_or_else(|| self.move_detection_threshold()),
            unchanged_threshold: self.unchanged_threshold(),
            move_distance: self.move_distance(),
            critical_keywords: overrides
                .critical_keywords
                .clone()
                .unwrap_or_else(|| self.critical_keywords()),
            strategy: overrides.strategy.unwrap_or_else(|| self.strategy()),
        }
    }
}

/// Comparison settings given on the command line
#[derive(Debug, Clone, Default)]
pub struct CompareOverrides {
    pub similarity_threshold: Option<f32>,
    pub move_detection_threshold: Option<f32>,
    pub critical_keywords: Option<Vec<String>>,
    pub strategy: Option<MatchStrategy>,
}

/// Embedding configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider type (command, builtin, hashing)
    pub provider: Option<EmbeddingProviderType>,
    /// Model identifier for the embedding provider
    pub model: Option<String>,
    /// Command to execute for command provider
    pub command: Option<String>,
    /// Texts per provider call
    pub batch_size: Option<usize>,
    /// Whether to cache embeddings during a run
    pub cache: Option<bool>,
    /// Vector width of the hashing provider
    pub dimension: Option<usize>,
}

impl EmbeddingConfig {
    /// Get provider type (defaults to Builtin)
    pub fn provider(&self) -> EmbeddingProviderType {
        self.provider.unwrap_or_default()
    }

    /// Get model identifier (defaults to "paraphrase-multilingual-mpnet-base-v2")
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or("paraphrase-multilingual-mpnet-base-v2")
    }

    /// Get command (defaults to "embedder")
    pub fn command(&self) -> &str {
        self.command.as_deref().unwrap_or("embedder")
    }

    /// Get cache enablement (defaults to true)
    pub fn cache(&self) -> bool {
        self.cache.unwrap_or(true)
    }

    /// Get hashing dimension (defaults to 512)
    pub fn dimension(&self) -> usize {
        self.dimension.unwrap_or(DEFAULT_HASHING_DIM)
    }
}

/// Paragraph splitting configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParagraphConfig {
    /// Paragraphs shorter than this many characters are dropped
    pub min_chars: Option<usize>,
}

impl ParagraphConfig {
    /// Get minimum paragraph length (defaults to 10)
    pub fn min_chars(&self) -> usize {
        self.min_chars.unwrap_or(10)
    }
}

/// Configuration loaded from .paradiffrc.toml or ~/.config/paradiff/config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format (text or json)
    pub default_format: Option<String>,

    /// Comparison configuration
    #[serde(default)]
    pub compare: CompareSection,

    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,

    /// Paragraph splitting configuration
    #[serde(default)]
    pub paragraphs: ParagraphConfig,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. .paradiffrc.toml in current directory
    /// 2. ~/.config/paradiff/config.toml
    pub fn load() -> Self {
        Self::load_for_dir(Path::new("."))
    }

    /// Same as [`Config::load`], looking for the project file in `dir`.
    pub fn load_for_dir(dir: &Path) -> Self {
        if let Some(config) = Self::load_from_path(&dir.join(CONFIG_FILE_NAME)) {
            return config;
        }

        if let Some(config_path) = Self::user_config_path() {
            if let Some(config) = Self::load_from_path(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    /// Parse one config file. Missing or unreadable files yield `None`;
    /// parse errors are logged and also yield `None`.
    pub fn load_from_path(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("paradiff").join("config.toml"))
    }

    /// Get output format from config, parsing the string to ConfigOutputFormat
    pub fn output_format(&self) -> Option<ConfigOutputFormat> {
        self.default_format.as_ref().and_then(|s| match s.to_lowercase().as_str() {
            "json" => Some(ConfigOutputFormat::Json),
            "text" => Some(ConfigOutputFormat::Text),
            _ => None,
        })
    }

    /// Get the comparison configuration
    pub fn compare(&self) -> &CompareSection {
        &self.compare
    }

    /// Get the embedding configuration
    pub fn embeddings(&self) -> &EmbeddingConfig {
        &self.embeddings
    }

    /// Get the paragraph configuration
    pub fn paragraphs(&self) -> &ParagraphConfig {
        &self.paragraphs
    }

    /// Merge CLI options with config (CLI wins)
    pub fn merge_min_chars(&self, cli_value: Option<usize>) -> usize {
        cli_value.unwrap_or_else(|| self.paragraphs.min_chars())
    }
}
