// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the comparison core.

use thiserror::Error;

/// Rejections raised before any similarity work begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompareError {
    #[error("Invalid {name}: {value}. Must be within (0.0, 1.0]")]
    InvalidThreshold { name: &'static str, value: f32 },

    #[error("Length mismatch for {side} document: {texts} paragraphs but {embeddings} embeddings")]
    LengthMismatch {
        side: &'static str,
        texts: usize,
        embeddings: usize,
    },

    #[error("Similarity matrix is {rows}x{cols} but the documents have {old} and {new} paragraphs")]
    MatrixShape {
        rows: usize,
        cols: usize,
        old: usize,
        new: usize,
    },

    #[error("Critical keyword must not be empty")]
    EmptyKeyword,
}

/// Structural failures of the exact assignment solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignmentError {
    #[error("Cost matrix has {actual} entries, expected {expected} for a square matrix")]
    NotSquare { expected: usize, actual: usize },

    #[error("Cost matrix contains a non-finite value at ({row}, {col})")]
    NonFinite { row: usize, col: usize },
}
