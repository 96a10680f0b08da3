// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output and color utilities for consistent terminal formatting
//!
//! Provides shared color functions respecting NO_COLOR environment variable.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::diff::{ChangeSeverity, ChangeType};

/// Check if colors should be used (respects NO_COLOR env var)
pub fn use_colors() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Colorize severity label (critical red bold, major red, minor yellow, trivial dimmed)
pub fn colorize_severity(severity: ChangeSeverity, use_color: bool) -> String {
    let label = format!("[{}]", severity);
    if !use_color {
        return label;
    }
    match severity {
        ChangeSeverity::Critical => label.red().bold().to_string(),
        ChangeSeverity::Major => label.red().to_string(),
        ChangeSeverity::Minor => label.yellow().to_string(),
        ChangeSeverity::Trivial => label.dimmed().to_string(),
    }
}

/// Colorize change type (added green, deleted red, moved cyan, modified yellow)
pub fn colorize_change_type(change_type: ChangeType, use_color: bool) -> String {
    let label = change_type.to_string();
    if !use_color {
        return label;
    }
    match change_type {
        ChangeType::Added => label.green().to_string(),
        ChangeType::Deleted => label.red().to_string(),
        ChangeType::Moved => label.cyan().to_string(),
        ChangeType::Modified => label.yellow().to_string(),
        ChangeType::Unchanged => label.dimmed().to_string(),
    }
}

/// Colorize paragraph position (yellow)
pub fn colorize_position(text: &str, use_color: bool) -> String {
    if use_color {
        text.yellow().to_string()
    } else {
        text.to_string()
    }
}

/// Colorize removed text (red)
pub fn colorize_removed(text: &str, use_color: bool) -> String {
    if use_color {
        text.red().to_string()
    } else {
        text.to_string()
    }
}

/// Colorize inserted text (green)
pub fn colorize_inserted(text: &str, use_color: bool) -> String {
    if use_color {
        text.green().to_string()
    } else {
        text.to_string()
    }
}

/// Colorize headings (bold)
pub fn colorize_heading(text: &str, use_color: bool) -> String {
    if use_color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Serialize to JSON, pretty unless `compact`
pub fn format_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    json.context("Failed to serialize JSON output")
}

/// Print JSON to stdout, pretty unless `compact`
pub fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
    println!("{}", format_json(value, compact)?);
    Ok(())
}
