// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic similarity of two texts

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use paradiff::config::Config;
use paradiff::embedding::Embedder;
use paradiff::output::{print_json, use_colors};

use crate::cli::{EmbeddingArgs, OutputFormat};
use crate::commands::{merge_embedding_config, resolve_format};

/// Similarity result for JSON output
#[derive(Debug, Serialize)]
struct SimilarityResult<'a> {
    model: &'a str,
    similarity: f64,
}

/// Run the similarity command
pub fn run(
    text_a: &str,
    text_b: &str,
    embedding: &EmbeddingArgs,
    format: Option<OutputFormat>,
    compact: bool,
) -> Result<()> {
    let config = Config::load();
    let format = resolve_format(&config, format);

    let embedding_config = merge_embedding_config(&config, embedding);
    let mut embedder =
        Embedder::from_config(&embedding_config).context("Failed to initialize embeddings")?;
    let similarity = embedder.compute_similarity(text_a, text_b);
    let rounded = (f64::from(similarity) * 10_000.0).round() / 10_000.0;

    match format {
        OutputFormat::Json => print_json(
            &SimilarityResult {
                model: embedder.model_id(),
                similarity: rounded,
            },
            compact,
        )?,
        OutputFormat::Text => {
            let score = format!("{:.4}", rounded);
            if use_colors() {
                println!("{}", score.cyan());
            } else {
                println!("{}", score);
            }
        }
    }

    Ok(())
}
