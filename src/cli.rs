// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// paradiff - Semantic paragraph diff
///
/// Aligns the paragraphs of two text documents by meaning, then reports
/// which were kept, reworded, moved, added or removed, and how much it matters.
#[derive(Parser, Debug)]
#[command(name = "paradiff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Compact JSON output (no pretty formatting)
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Matching strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliStrategy {
    /// Exact maximum-similarity assignment
    Optimal,
    /// Highest-similarity-first, approximate
    Greedy,
}

/// Embedding provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliProvider {
    /// Local fastembed model
    Builtin,
    /// External command speaking JSON over stdin/stdout
    Command,
    /// Deterministic word hashing (no model)
    Hashing,
}

/// Embedding settings shared by subcommands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EmbeddingArgs {
    /// Embedding provider (overrides config)
    #[arg(long, value_enum, help_heading = "Embeddings")]
    pub provider: Option<CliProvider>,

    /// Embedding model name
    #[arg(long, help_heading = "Embeddings")]
    pub model: Option<String>,

    /// Embedding command for the command provider
    #[arg(long, help_heading = "Embeddings")]
    pub command: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two text documents paragraph by paragraph
    Compare {
        /// Old version of the document
        old: PathBuf,

        /// New version of the document
        new: PathBuf,

        /// Minimum similarity for two paragraphs to be paired (0.0-1.0]
        #[arg(short, long, help_heading = "Matching")]
        threshold: Option<f32>,

        /// Minimum similarity for a far-moved paragraph to count as moved
        #[arg(long, help_heading = "Matching")]
        move_threshold: Option<f32>,

        /// Critical keyword (repeatable, replaces the defaults)
        #[arg(short = 'k', long = "keyword", help_heading = "Matching")]
        keywords: Vec<String>,

        /// Matching strategy
        #[arg(long, value_enum, help_heading = "Matching")]
        strategy: Option<CliStrategy>,

        /// Drop paragraphs shorter than this many characters
        #[arg(long, help_heading = "Input")]
        min_chars: Option<usize>,

        /// Also list unchanged paragraphs in text output
        #[arg(long)]
        show_unchanged: bool,

        #[command(flatten)]
        embedding: EmbeddingArgs,
    },

    /// Print the semantic similarity of two texts (0.0-1.0)
    Similarity {
        /// First text
        text_a: String,

        /// Second text
        text_b: String,

        #[command(flatten)]
        embedding: EmbeddingArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
