// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations

pub mod compare;
pub mod similarity;

use paradiff::config::{Config, ConfigOutputFormat, EmbeddingConfig, EmbeddingProviderType};

use crate::cli::{CliProvider, EmbeddingArgs, OutputFormat};

/// Config embedding settings with CLI flags applied on top (CLI wins)
pub fn merge_embedding_config(config: &Config, args: &EmbeddingArgs) -> EmbeddingConfig {
    let mut merged = config.embeddings().clone();
    if let Some(provider) = args.provider {
        merged.provider = Some(match provider {
            CliProvider::Builtin => EmbeddingProviderType::Builtin,
            CliProvider::Command => EmbeddingProviderType::Command,
            CliProvider::Hashing => EmbeddingProviderType::Hashing,
        });
    }
    if let Some(model) = &args.model {
        merged.model = Some(model.clone());
    }
    if let Some(command) = &args.command {
        merged.command = Some(command.clone());
    }
    merged
}

/// CLI format, else config default, else text
pub fn resolve_format(config: &Config, cli_format: Option<OutputFormat>) -> OutputFormat {
    cli_format.unwrap_or(match config.output_format() {
        Some(ConfigOutputFormat::Json) => OutputFormat::Json,
        Some(ConfigOutputFormat::Text) | None => OutputFormat::Text,
    })
}
