// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding provider interface and implementations.
//!
//! This module provides a fastembed-based provider for local multilingual
//! models, a command provider that shells out to an external embedder, and
//! a deterministic feature-hashing provider that needs no model at all.

use anyhow::{bail, Context, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use serde_json::Value;
use std::borrow::Cow;
use std::env;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::config::{EmbeddingConfig, EmbeddingProviderType};

const DEFAULT_FASTEMBED_MODEL: &str = "paraphrase-multilingual-mpnet-base-v2";
const DEFAULT_FASTEMBED_BATCH_SIZE: usize = 32;
const MAX_FASTEMBED_BATCH_SIZE: usize = 1024;
const DEFAULT_FASTEMBED_MAX_CHARS: usize = 2000;
const DEFAULT_COMMAND_BATCH_SIZE: usize = 64;
const DEFAULT_HASHING_BATCH_SIZE: usize = 512;

/// Default vector width of the hashing provider.
pub const DEFAULT_HASHING_DIM: usize = 512;

/// Configuration for the fastembed provider.
#[derive(Debug, Clone)]
pub struct EmbeddingProviderConfig {
    pub model: EmbeddingModel,
    pub batch_size: usize,
    pub max_chars: usize,
    pub normalize: bool,
}

impl EmbeddingProviderConfig {
    /// Config for a named model with default batching.
    pub fn for_model(name: &str) -> Result<Self> {
        Ok(Self {
            model: parse_model_name(name)?,
            ..Self::default()
        })
    }

    /// Apply `FASTEMBED_*` environment overrides on top of this config.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(raw) = env::var("FASTEMBED_MODEL") {
            if !raw.trim().is_empty() {
                self.model = parse_model_name(&raw)?;
            }
        }

        let mut batch_size = parse_usize_env("FASTEMBED_BATCH_SIZE", self.batch_size)?;
        if batch_size == 0 {
            batch_size = DEFAULT_FASTEMBED_BATCH_SIZE;
        }
        if batch_size > MAX_FASTEMBED_BATCH_SIZE {
            tracing::warn!(
                "FASTEMBED_BATCH_SIZE={} exceeds max {}; clamping.",
                batch_size,
                MAX_FASTEMBED_BATCH_SIZE
            );
            batch_size = MAX_FASTEMBED_BATCH_SIZE;
        }
        self.batch_size = batch_size;

        let mut max_chars = parse_usize_env("FASTEMBED_MAX_CHARS", self.max_chars)?;
        if max_chars == 0 {
            max_chars = DEFAULT_FASTEMBED_MAX_CHARS;
        }
        self.max_chars = max_chars;

        self.normalize = parse_bool_env("FASTEMBED_NORMALIZE", self.normalize)?;
        Ok(self)
    }

    pub fn has_env_overrides() -> bool {
        env::var_os("FASTEMBED_MODEL").is_some()
            || env::var_os("FASTEMBED_BATCH_SIZE").is_some()
            || env::var_os("FASTEMBED_MAX_CHARS").is_some()
            || env::var_os("FASTEMBED_NORMALIZE").is_some()
    }
}

impl Default for EmbeddingProviderConfig {
    fn default() -> Self {
        Self {
            model: EmbeddingModel::ParaphraseMLMpnetBaseV2,
            batch_size: DEFAULT_FASTEMBED_BATCH_SIZE,
            max_chars: DEFAULT_FASTEMBED_MAX_CHARS,
            normalize: true,
        }
    }
}

/// Trait for embedding providers.
pub trait EmbeddingProvider: Send {
    /// Returns the model identifier.
    fn model_id(&self) -> &str;

    /// Returns the batch size used by the provider.
    fn batch_size(&self) -> usize;

    /// Generates embeddings for the given texts, one vector per text in order.
    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Generates an embedding for a single text.
    fn embed_one(&mut self, text: &str) -> Result<Vec<f32>> {
        let mut result = self.embed_texts(&[text.to_string()])?;
        result
            .pop()
            .ok_or_else(|| anyhow::anyhow!("No embedding returned"))
    }
}

/// Build the provider selected by the embedding configuration.
pub fn create_provider(config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    let provider: Box<dyn EmbeddingProvider> = match config.provider() {
        EmbeddingProviderType::Builtin => {
            let mut provider_config = EmbeddingProviderConfig::for_model(config.model())?;
            if let Some(batch_size) = config.batch_size {
                provider_config.batch_size = batch_size.clamp(1, MAX_FASTEMBED_BATCH_SIZE);
            }
            if EmbeddingProviderConfig::has_env_overrides() {
                provider_config = provider_config.with_env_overrides()?;
            }
            Box::new(FastEmbedder::new(provider_config)?)
        }
        EmbeddingProviderType::Command => {
            let mut provider =
                CommandProvider::new(config.command().to_string(), config.model().to_string());
            if let Some(batch_size) = config.batch_size {
                provider = provider.with_batch_size(batch_size);
            }
            Box::new(provider)
        }
        EmbeddingProviderType::Hashing => Box::new(HashingProvider::new(config.dimension())),
    };

    tracing::debug!(
        provider = ?config.provider(),
        model = provider.model_id(),
        batch_size = provider.batch_size(),
        "embedding provider ready"
    );
    Ok(provider)
}

/// FastEmbed provider running a local sentence-transformers model.
pub struct FastEmbedder {
    embedder: TextEmbedding,
    config: EmbeddingProviderConfig,
    model_id: String,
}

impl FastEmbedder {
    pub fn new(config: EmbeddingProviderConfig) -> Result<Self> {
        let model = config.model.clone();
        let model_id = model.to_string();
        let init = InitOptions::new(model);
        let embedder =
            TextEmbedding::try_new(init).context("Failed to initialize fastembed model")?;

        Ok(Self {
            embedder,
            config,
            model_id,
        })
    }
}

impl EmbeddingProvider for FastEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let prepared = truncate_texts(texts, self.config.max_chars);
        let mut embeddings = self
            .embedder
            .embed(&prepared, Some(self.config.batch_size))?;

        if self.config.normalize {
            for embedding in embeddings.iter_mut() {
                l2_normalize(embedding);
            }
        }

        Ok(embeddings)
    }
}

/// Command provider that shells out to an external process.
///
/// The command receives `{"model": ..., "texts": [...]}` on stdin and must
/// print a JSON array of vectors, or an object holding one under
/// `embeddings`, `vectors` or `data`.
pub struct CommandProvider {
    command: String,
    model: String,
    batch_size: usize,
}

impl CommandProvider {
    pub fn new(command: String, model: String) -> Self {
        Self {
            command,
            model,
            batch_size: DEFAULT_COMMAND_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    fn run_command(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let payload = serde_json::json!({
            "model": self.model,
            "texts": texts,
        });

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn embedding command: {}", self.command))?;

        if let Some(mut stdin) = child.stdin.take() {
            let payload_str = payload.to_string();
            stdin
                .write_all(payload_str.as_bytes())
                .context("Failed to write embeddings payload to stdin")?;
        }

        let output = child
            .wait_with_output()
            .context("Failed to read embeddings command output")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "Embedding command failed (status {}): {}",
                output.status,
                stderr.trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_command_output(stdout.trim())
    }
}

impl EmbeddingProvider for CommandProvider {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.run_command(texts)
    }
}

fn parse_command_output(raw: &str) -> Result<Vec<Vec<f32>>> {
    let parsed: Value = serde_json::from_str(raw)
        .with_context(|| "Failed to parse embeddings command output as JSON")?;

    let embeddings_value = match parsed {
        Value::Array(arr) => Value::Array(arr),
        Value::Object(ref obj) => {
            if let Some(value) = obj.get("embeddings") {
                value.clone()
            } else if let Some(value) = obj.get("vectors") {
                value.clone()
            } else if let Some(value) = obj.get("data") {
                value.clone()
            } else {
                bail!("Embeddings command output missing 'embeddings' field");
            }
        }
        _ => bail!("Embeddings command output must be JSON array or object"),
    };

    embeddings_value
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("Embeddings output must be a JSON array"))?
        .iter()
        .map(|row| {
            row.as_array()
                .ok_or_else(|| anyhow::anyhow!("Embedding row must be an array"))?
                .iter()
                .map(|value| {
                    value
                        .as_f64()
                        .ok_or_else(|| anyhow::anyhow!("Embedding value must be a number"))
                        .map(|v| v as f32)
                })
                .collect::<Result<Vec<f32>>>()
        })
        .collect::<Result<Vec<Vec<f32>>>>()
}

/// Deterministic bag-of-words provider using signed feature hashing.
///
/// Each lower-cased word is hashed with blake3 into one of `dimension`
/// buckets with a +1/-1 sign; the result is L2-normalized. Texts sharing
/// most words score high, unrelated texts land near the neutral 0.5.
pub struct HashingProvider {
    model: String,
    dimension: usize,
    batch_size: usize,
}

impl HashingProvider {
    pub fn new(dimension: usize) -> Self {
        let dimension = dimension.max(1);
        Self {
            model: format!("hashing-{}", dimension),
            dimension,
            batch_size: DEFAULT_HASHING_BATCH_SIZE,
        }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let token = token.to_lowercase();
            let hash = blake3::hash(token.as_bytes());
            let bytes = hash.as_bytes();
            let mut bucket_bytes = [0u8; 8];
            bucket_bytes.copy_from_slice(&bytes[..8]);
            let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimension as u64) as usize;
            let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }
        l2_normalize(&mut vector);
        vector
    }
}

impl Default for HashingProvider {
    fn default() -> Self {
        Self::new(DEFAULT_HASHING_DIM)
    }
}

impl EmbeddingProvider for HashingProvider {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}

fn truncate_texts<'a>(texts: &'a [String], max_chars: usize) -> Vec<Cow<'a, str>> {
    texts
        .iter()
        .map(|text| truncate_to_chars(text.as_str(), max_chars))
        .collect()
}

fn truncate_to_chars<'a>(input: &'a str, max_chars: usize) -> Cow<'a, str> {
    if max_chars == 0 {
        return Cow::Borrowed("");
    }

    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => Cow::Owned(input[..idx].to_string()),
        None => Cow::Borrowed(input),
    }
}

fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vector.iter_mut() {
        *value /= norm;
    }
}

fn parse_model_name(raw: &str) -> Result<EmbeddingModel> {
    let value = raw.trim();
    if value.is_empty() {
        return parse_model_name(DEFAULT_FASTEMBED_MODEL);
    }

    match value.to_lowercase().as_str() {
        "paraphrase-multilingual-mpnet-base-v2"
        | "sentence-transformers/paraphrase-multilingual-mpnet-base-v2"
        | "multilingual-mpnet" => Ok(EmbeddingModel::ParaphraseMLMpnetBaseV2),
        "paraphrase-multilingual-minilm-l12-v2"
        | "sentence-transformers/paraphrase-multilingual-minilm-l12-v2"
        | "multilingual-minilm" => Ok(EmbeddingModel::ParaphraseMLMiniLML12V2),
        "minilm"
        | "all-minilm-l6-v2"
        | "sentence-transformers/all-minilm-l6-v2" => Ok(EmbeddingModel::AllMiniLML6V2),
        other => bail!(
            "Unsupported embedding model '{}'. Supported values: multilingual-mpnet, multilingual-minilm, minilm",
            other
        ),
    }
}

fn parse_usize_env(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(raw) => {
            let value = raw.trim();
            if value.is_empty() {
                Ok(default)
            } else {
                value
                    .parse::<usize>()
                    .with_context(|| format!("Invalid {} value: {}", name, value))
            }
        }
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("Failed to read {}", name)),
    }
}

fn parse_bool_env(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(raw) => {
            let value = raw.trim().to_lowercase();
            if value.is_empty() {
                return Ok(default);
            }
            match value.as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                other => bail!("Invalid {} value: {}", name, other),
            }
        }
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("Failed to read {}", name)),
    }
}
