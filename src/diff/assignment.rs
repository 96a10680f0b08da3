// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bipartite assignment over a similarity matrix.
//!
//! `optimal_pairs` solves the minimum-cost perfect assignment on
//! `1 - similarity` with the Kuhn–Munkres method (shortest augmenting
//! paths with dual potentials, O(k^3) for k = max(rows, cols)).
//! `greedy_pairs` is the approximate highest-first fallback.

use std::cmp::Ordering;

use crate::diff::similarity::SimilarityMatrix;
use crate::errors::AssignmentError;

/// Cost of pairing a real row with a padding column (or vice versa).
const PADDING_COST: f64 = 0.0;

/// Solve min-cost perfect assignment on a row-major `n x n` cost matrix.
///
/// Returns `assignment[row] = col`. Scans run in ascending index order and
/// only move on strict improvement, so equal-cost optima resolve the same
/// way on every run.
pub fn solve_min_cost(n: usize, cost: &[f64]) -> Result<Vec<usize>, AssignmentError> {
    if cost.len() != n * n {
        return Err(AssignmentError::NotSquare {
            expected: n * n,
            actual: cost.len(),
        });
    }
    if let Some(pos) = cost.iter().position(|c| !c.is_finite()) {
        return Err(AssignmentError::NonFinite {
            row: pos / n,
            col: pos % n,
        });
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    let at = |row: usize, col: usize| cost[(row - 1) * n + (col - 1)];

    // 1-based with index 0 as the virtual source column.
    let mut u = vec![0.0f64; n + 1];
    let mut v = vec![0.0f64; n + 1];
    let mut p = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for row in 1..=n {
        p[0] = row;
        let mut j0 = 0usize;
        let mut minv = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0usize;

            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let cur = at(i0, j) - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=n {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![0usize; n];
    for col in 1..=n {
        assignment[p[col] - 1] = col - 1;
    }
    Ok(assignment)
}

/// Pairs `(old, new)` maximizing total similarity, ignoring the threshold.
///
/// The matrix is padded to square; pairs landing on padding are dropped.
/// Result is sorted by old index.
pub fn optimal_pairs(matrix: &SimilarityMatrix) -> Result<Vec<(usize, usize)>, AssignmentError> {
    let rows = matrix.rows();
    let cols = matrix.cols();
    if rows == 0 || cols == 0 {
        return Ok(Vec::new());
    }

    let n = rows.max(cols);
    let mut cost = vec![PADDING_COST; n * n];
    for i in 0..rows {
        for (j, sim) in matrix.row(i).iter().enumerate() {
            cost[i * n + j] = 1.0 - f64::from(*sim);
        }
    }

    let assignment = solve_min_cost(n, &cost)?;
    Ok(assignment
        .into_iter()
        .enumerate()
        .filter(|&(i, j)| i < rows && j < cols)
        .collect())
}

/// Highest-similarity-first matching.
///
/// Repeatedly takes the best remaining cell, accepts it if it reaches
/// `threshold`, and retires its row and column. Ties go to the lowest old
/// index, then the lowest new index. Not globally optimal.
pub fn greedy_pairs(matrix: &SimilarityMatrix, threshold: f32) -> Vec<(usize, usize)> {
    let rows = matrix.rows();
    let cols = matrix.cols();

    let mut cells: Vec<(usize, usize, f32)> = (0..rows)
        .flat_map(|i| {
            matrix
                .row(i)
                .iter()
                .enumerate()
                .filter(|(_, sim)| **sim >= threshold)
                .map(move |(j, sim)| (i, j, *sim))
        })
        .collect();

    cells.sort_by(|a, b| {
        b.2.partial_cmp(&a.2)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
            .then_with(|| a.1.cmp(&b.1))
    });

    let mut used_old = vec![false; rows];
    let mut used_new = vec![false; cols];
    let mut pairs = Vec::new();

    for (i, j, _) in cells {
        if used_old[i] || used_new[j] {
            continue;
        }
        used_old[i] = true;
        used_new[j] = true;
        pairs.push((i, j));
    }

    pairs.sort_unstable();
    pairs
}
