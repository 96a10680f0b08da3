// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns an assignment over the similarity matrix into paragraph matches.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::diff::assignment::{greedy_pairs, optimal_pairs};
use crate::diff::similarity::SimilarityMatrix;
use crate::diff::types::ParagraphMatch;

/// How old paragraphs are paired with new ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Exact maximum-similarity assignment
    #[default]
    Optimal,
    /// Highest-similarity-first; approximate
    Greedy,
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStrategy::Optimal => write!(f, "optimal"),
            MatchStrategy::Greedy => write!(f, "greedy"),
        }
    }
}

impl std::str::FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "optimal" | "hungarian" | "o" => Ok(MatchStrategy::Optimal),
            "greedy" | "g" => Ok(MatchStrategy::Greedy),
            _ => Err(format!("Unknown match strategy: {}", s)),
        }
    }
}

/// Thresholds steering the matcher
#[derive(Debug, Clone, Copy)]
pub struct MatcherOptions {
    /// Minimum similarity for a pair to count as a match (inclusive)
    pub similarity_threshold: f32,
    /// Pairs scoring strictly above this are unchanged
    pub unchanged_threshold: f32,
    pub strategy: MatchStrategy,
}

/// Pair paragraphs and emit one match per paragraph.
///
/// Accepted pairs come first in old-index order, then deletions in
/// old-index order, then additions in new-index order.
///
/// # Panics
///
/// Panics if `matrix` is not `old_paragraphs.len() x new_paragraphs.len()`.
/// [`crate::diff::Comparator::compare_matrix`] checks the shape and
/// returns an error instead.
pub fn find_matches<S: AsRef<str>>(
    old_paragraphs: &[S],
    new_paragraphs: &[S],
    matrix: &SimilarityMatrix,
    options: &MatcherOptions,
) -> Vec<ParagraphMatch> {
    let n_old = old_paragraphs.len();
    let n_new = new_paragraphs.len();
    assert!(
        matrix.rows() == n_old && matrix.cols() == n_new,
        "similarity matrix shape does not match paragraph counts"
    );

    let pairs = match options.strategy {
        MatchStrategy::Optimal => match optimal_pairs(matrix) {
            Ok(pairs) => pairs,
            Err(err) => {
                warn!("Optimal assignment unavailable ({}); using greedy matching", err);
                greedy_pairs(matrix, options.similarity_threshold)
            }
        },
        MatchStrategy::Greedy => greedy_pairs(matrix, options.similarity_threshold),
    };

    let mut matched_old = vec![false; n_old];
    let mut matched_new = vec![false; n_new];
    let mut matches = Vec::with_capacity(n_old.max(n_new));
    let mut rejected = 0usize;

    for (old_idx, new_idx) in pairs {
        let similarity = matrix.get(old_idx, new_idx);
        // The solver is blind to the threshold
        if similarity < options.similarity_threshold {
            rejected += 1;
            continue;
        }

        matches.push(ParagraphMatch::paired(
            old_idx,
            new_idx,
            old_paragraphs[old_idx].as_ref(),
            new_paragraphs[new_idx].as_ref(),
            similarity,
            options.unchanged_threshold,
        ));
        matched_old[old_idx] = true;
        matched_new[new_idx] = true;
    }

    let accepted = matches.len();

    for (old_idx, text) in old_paragraphs.iter().enumerate() {
        if !matched_old[old_idx] {
            matches.push(ParagraphMatch::deleted(old_idx, text.as_ref()));
        }
    }

    for (new_idx, text) in new_paragraphs.iter().enumerate() {
        if !matched_new[new_idx] {
            matches.push(ParagraphMatch::added(new_idx, text.as_ref()));
        }
    }

    debug!(
        strategy = %options.strategy,
        accepted,
        rejected,
        deleted = n_old - accepted,
        added = n_new - accepted,
        "paragraph matching finished"
    );

    matches
}
