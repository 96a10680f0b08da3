// SPDX-License-Identifier: MIT OR Apache-2.0

//! paradiff - Semantic paragraph diff tool
//!
//! Splits two document versions into paragraphs, embeds them, and aligns
//! them with an exact assignment solver to report what changed.

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize tracing with PARADIFF_LOG env var (e.g., PARADIFF_LOG=debug paradiff compare a.txt b.txt)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PARADIFF_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;
    let compact = cli.compact;

    match cli.command {
        Commands::Compare {
            old,
            new,
            threshold,
            move_threshold,
            keywords,
            strategy,
            min_chars,
            show_unchanged,
            embedding,
        } => {
            commands::compare::run(
                commands::compare::CompareArgs {
                    old: &old,
                    new: &new,
                    threshold,
                    move_threshold,
                    keywords,
                    strategy,
                    min_chars,
                    show_unchanged,
                    embedding: &embedding,
                },
                format,
                compact,
            )?;
        }
        Commands::Similarity {
            text_a,
            text_b,
            embedding,
        } => {
            commands::similarity::run(&text_a, &text_b, &embedding, format, compact)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "paradiff", &mut std::io::stdout());
        }
    }

    Ok(())
}
