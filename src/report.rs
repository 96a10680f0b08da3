// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of comparison results for the terminal.

use anyhow::Result;
use std::fmt::Write as _;

use crate::diff::{ChangeType, ComparisonResult, ParagraphMatch};
use crate::output::{
    colorize_change_type, colorize_heading, colorize_inserted, colorize_position,
    colorize_removed, colorize_severity, format_json,
};

/// Paragraph excerpts in the text report are cut to this many characters.
const EXCERPT_CHARS: usize = 120;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Also list unchanged paragraphs
    pub show_unchanged: bool,
    pub use_color: bool,
}

/// JSON document with `summary`, `matches`, `critical_changes` and `major_changes`.
pub fn render_json(result: &ComparisonResult, compact: bool) -> Result<String> {
    format_json(result, compact)
}

/// Human-readable report: summary block, then one entry per change.
pub fn render_text(result: &ComparisonResult, options: TextOptions) -> String {
    let color = options.use_color;
    let s = &result.summary;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        colorize_heading(
            &format!(
                "Compared {} old and {} new paragraphs",
                s.total_old, s.total_new
            ),
            color
        )
    );
    let _ = writeln!(
        out,
        "  unchanged {} | modified {} | moved {} | added {} | deleted {}",
        s.unchanged, s.modified, s.moved, s.added, s.deleted
    );
    let _ = writeln!(
        out,
        "  average similarity {:.1}% | critical {} | major {}",
        s.average_similarity * 100.0,
        result.critical_changes.len(),
        result.major_changes.len()
    );

    if result.is_identical() {
        let _ = writeln!(out, "\nNo changes detected");
        if !options.show_unchanged {
            return out;
        }
    }

    for m in &result.matches {
        if m.change_type == ChangeType::Unchanged && !options.show_unchanged {
            continue;
        }
        out.push('\n');
        write_match(&mut out, m, color);
    }

    out
}

fn write_match(out: &mut String, m: &ParagraphMatch, color: bool) {
    let _ = writeln!(
        out,
        "{} {} {}  {}",
        colorize_severity(m.severity, color),
        colorize_change_type(m.change_type, color),
        colorize_position(&positions(m), color),
        m.explanation
    );

    match m.change_type {
        ChangeType::Added => {
            let _ = writeln!(out, "    + {}", colorize_inserted(&excerpt(&m.new_text), color));
        }
        ChangeType::Deleted => {
            let _ = writeln!(out, "    - {}", colorize_removed(&excerpt(&m.old_text), color));
        }
        ChangeType::Unchanged => {
            let _ = writeln!(out, "      {}", excerpt(&m.new_text));
        }
        ChangeType::Modified | ChangeType::Moved => {
            let _ = writeln!(out, "    - {}", colorize_removed(&excerpt(&m.old_text), color));
            let _ = writeln!(out, "    + {}", colorize_inserted(&excerpt(&m.new_text), color));
        }
    }
}

/// `#old -> #new`, 1-based, with `-` for the missing side.
fn positions(m: &ParagraphMatch) -> String {
    let pos = |idx: Option<usize>| {
        idx.map(|i| format!("#{}", i + 1))
            .unwrap_or_else(|| "-".to_string())
    };
    format!("{} -> {}", pos(m.old_index), pos(m.new_index))
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
