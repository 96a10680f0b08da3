// SPDX-License-Identifier: MIT OR Apache-2.0

//! Splits plain text into paragraphs.
//!
//! A paragraph ends at a blank line or where the next line opens a
//! numbered, lettered, roman or bulleted item. Wrapped lines are joined
//! with single spaces.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// `1. `, `1.2. `, `1.2.3. `
static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.(?:\d+\.)*\s+").unwrap());
/// `a) `
static LETTERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]\)\s+").unwrap());
/// `iv. `, `IV. `
static ROMAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[ivxlcdm]+\.\s+").unwrap());
/// `• `, `- `, `* `
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•\-\*]\s+").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

pub const DEFAULT_MIN_CHARS: usize = 10;

/// Does this (trimmed) line open a list item?
pub fn is_item_start(line: &str) -> bool {
    NUMBERED.is_match(line)
        || LETTERED.is_match(line)
        || ROMAN.is_match(line)
        || BULLET.is_match(line)
}

/// Paragraph splitter with a minimum paragraph length
#[derive(Debug, Clone, Copy)]
pub struct ParagraphSplitter {
    min_chars: usize,
}

impl Default for ParagraphSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CHARS)
    }
}

impl ParagraphSplitter {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }

    /// Split `content` into paragraphs, dropping those shorter than `min_chars` characters.
    pub fn split(&self, content: &str) -> Vec<String> {
        let mut paragraphs = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                self.flush(&mut current, &mut paragraphs);
                continue;
            }
            if !current.is_empty() && is_item_start(line) {
                self.flush(&mut current, &mut paragraphs);
            }
            current.push(line);
        }
        self.flush(&mut current, &mut paragraphs);

        paragraphs
    }

    fn flush(&self, current: &mut Vec<&str>, paragraphs: &mut Vec<String>) {
        if current.is_empty() {
            return;
        }
        let text = clean(&current.join(" "));
        current.clear();
        if text.chars().count() >= self.min_chars {
            paragraphs.push(text);
        }
    }

    /// Read a UTF-8 text file and split it.
    pub fn split_file(&self, path: &Path) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(self.split(&content))
    }
}

/// Collapse whitespace runs and drop soft hyphens.
pub fn clean(paragraph: &str) -> String {
    let without_soft_hyphens = paragraph.replace('\u{00ad}', "");
    WHITESPACE
        .replace_all(without_soft_hyphens.trim(), " ")
        .into_owned()
}
