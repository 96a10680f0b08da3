// SPDX-License-Identifier: MIT OR Apache-2.0

//! paradiff - Semantic paragraph diff library
//!
//! Aligns the paragraphs of two document versions by meaning and rates
//! every change. Shared modules for the paradiff CLI tool.

pub mod config;
pub mod diff;
pub mod embedding;
pub mod errors;
pub mod output;
pub mod paragraphs;
pub mod report;
