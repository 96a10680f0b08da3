// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pairwise similarity between old and new paragraph embeddings.

use rayon::prelude::*;

use crate::embedding::Embedding;

/// Compute cosine similarity between two vectors
///
/// Returns the raw cosine in [-1, 1]; 0.0 for empty, zero-norm or
/// mismatched vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    // f64 accumulation keeps large components from overflowing to inf.
    let dot_product: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    let magnitude_a: f64 = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let magnitude_b: f64 = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    let cosine = dot_product / (magnitude_a * magnitude_b);
    if cosine.is_finite() {
        cosine as f32
    } else {
        0.0
    }
}

/// Normalize cosine similarity to 0-1 range
/// Cosine similarity is in [-1, 1], we map to [0, 1]
pub fn normalize_score(cos_sim: f32) -> f32 {
    ((cos_sim + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Similarity of two vectors on the [0, 1] scale.
///
/// Vectors that carry no signal (empty, zero norm, different dimension)
/// score 0.0 rather than the neutral 0.5 of an orthogonal pair. Identical
/// vectors score exactly 1.0. Non-finite components yield 0.0.
pub fn vector_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() || is_zero(a) || is_zero(b) {
        return 0.0;
    }
    if !is_finite(a) || !is_finite(b) {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    clamp_unit(normalize_score(cosine_similarity(a, b)))
}

fn is_finite(v: &[f32]) -> bool {
    v.iter().all(|x| x.is_finite())
}

fn is_zero(v: &[f32]) -> bool {
    v.iter().all(|x| *x == 0.0)
}

/// Dense row-major `rows x cols` table of similarity scores.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// All-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build from nested rows. Values are clamped to [0, 1]; short rows are
    /// zero-padded to the widest row.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Self {
        let row_count = rows.len();
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut data = vec![0.0; row_count * cols];
        for (i, row) in rows.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                data[i * cols + j] = clamp_unit(*value);
            }
        }
        Self {
            rows: row_count,
            cols,
            data,
        }
    }

    /// Similarity of every old embedding against every new one.
    ///
    /// Rows are filled in parallel; a missing embedding on either side
    /// leaves the cell at 0.0.
    pub fn build(old: &[Option<Embedding>], new: &[Option<Embedding>]) -> Self {
        let rows = old.len();
        let cols = new.len();
        let mut matrix = Self::zeros(rows, cols);
        if rows == 0 || cols == 0 {
            return matrix;
        }

        matrix
            .data
            .par_chunks_mut(cols)
            .zip(old.par_iter())
            .for_each(|(row, old_emb)| {
                let Some(old_emb) = old_emb else { return };
                for (cell, new_emb) in row.iter_mut().zip(new.iter()) {
                    if let Some(new_emb) = new_emb {
                        *cell = vector_similarity(&old_emb.vector, &new_emb.vector);
                    }
                }
            });

        matrix
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Score at (old, new). Panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.rows && col < self.cols, "similarity index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Overwrite one cell, clamped to [0, 1].
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(row < self.rows && col < self.cols, "similarity index out of bounds");
        self.data[row * self.cols + col] = clamp_unit(value);
    }

    /// Scores of one old paragraph against every new paragraph.
    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
