// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compare two documents paragraph by paragraph

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use paradiff::config::{CompareOverrides, Config};
use paradiff::diff::{Comparator, MatchStrategy};
use paradiff::embedding::Embedder;
use paradiff::output::use_colors;
use paradiff::paragraphs::ParagraphSplitter;
use paradiff::report::{render_json, render_text, TextOptions};

use crate::cli::{CliStrategy, EmbeddingArgs, OutputFormat};
use crate::commands::{merge_embedding_config, resolve_format};

/// Options of the compare command as given on the command line
#[derive(Debug)]
pub struct CompareArgs<'a> {
    pub old: &'a Path,
    pub new: &'a Path,
    pub threshold: Option<f32>,
    pub move_threshold: Option<f32>,
    pub keywords: Vec<String>,
    pub strategy: Option<CliStrategy>,
    pub min_chars: Option<usize>,
    pub show_unchanged: bool,
    pub embedding: &'a EmbeddingArgs,
}

/// Run the compare command
pub fn run(args: CompareArgs<'_>, format: Option<OutputFormat>, compact: bool) -> Result<()> {
    let config = Config::load();
    let format = resolve_format(&config, format);

    let overrides = CompareOverrides {
        similarity_threshold: args.threshold,
        move_detection_threshold: args.move_threshold,
        critical_keywords: (!args.keywords.is_empty()).then_some(args.keywords),
        strategy: args.strategy.map(|s| match s {
            CliStrategy::Optimal => MatchStrategy::Optimal,
            CliStrategy::Greedy => MatchStrategy::Greedy,
        }),
    };
    let comparator = Comparator::new(config.compare().resolve(&overrides))
        .context("Invalid comparison settings")?;

    let splitter = ParagraphSplitter::new(config.merge_min_chars(args.min_chars));
    let old_paragraphs = splitter.split_file(args.old)?;
    let new_paragraphs = splitter.split_file(args.new)?;
    debug!(
        old = old_paragraphs.len(),
        new = new_paragraphs.len(),
        "paragraphs extracted"
    );

    let embedding_config = merge_embedding_config(&config, args.embedding);
    let mut embedder =
        Embedder::from_config(&embedding_config).context("Failed to initialize embeddings")?;

    let result = comparator.compare(&mut embedder, &old_paragraphs, &new_paragraphs)?;

    if let Some(stats) = embedder.cache_stats() {
        debug!(
            size = stats.size,
            hits = stats.hits,
            misses = stats.misses,
            hit_rate = stats.hit_rate_percent,
            "embedding cache"
        );
    }

    match format {
        OutputFormat::Json => println!("{}", render_json(&result, compact)?),
        OutputFormat::Text => {
            let options = TextOptions {
                show_unchanged: args.show_unchanged,
                use_color: use_colors(),
            };
            print!("{}", render_text(&result, options));
        }
    }

    Ok(())
}
