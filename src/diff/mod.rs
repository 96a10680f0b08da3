// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic paragraph comparison.
//!
//! A comparison runs five stages over an owned match list:
//! similarity matrix, assignment, move detection, severity, aggregation.

pub mod aggregate;
pub mod assignment;
pub mod matcher;
pub mod moves;
pub mod severity;
pub mod similarity;
pub mod types;

pub use matcher::{MatchStrategy, MatcherOptions};
pub use severity::{SeverityClassifier, DEFAULT_CRITICAL_KEYWORDS};
pub use similarity::SimilarityMatrix;
pub use types::{ChangeSeverity, ChangeType, ComparisonResult, ComparisonSummary, ParagraphMatch};

use tracing::{debug, info};

use crate::embedding::{Embedder, Embedding};
use crate::errors::CompareError;

pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.75;
pub const DEFAULT_MOVE_DETECTION_THRESHOLD: f32 = 0.85;
pub const DEFAULT_UNCHANGED_THRESHOLD: f32 = 0.95;
/// Pairs shifted by at most this many positions are never moves.
pub const DEFAULT_MOVE_DISTANCE: usize = 2;

/// Tunables of a comparison
#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig {
    pub similarity_threshold: f32,
    pub move_detection_threshold: f32,
    pub unchanged_threshold: f32,
    pub move_distance: usize,
    pub critical_keywords: Vec<String>,
    pub strategy: MatchStrategy,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            move_detection_threshold: DEFAULT_MOVE_DETECTION_THRESHOLD,
            unchanged_threshold: DEFAULT_UNCHANGED_THRESHOLD,
            move_distance: DEFAULT_MOVE_DISTANCE,
            critical_keywords: DEFAULT_CRITICAL_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            strategy: MatchStrategy::default(),
        }
    }
}

impl CompareConfig {
    /// Reject thresholds outside (0, 1] and blank keywords.
    pub fn validate(&self) -> Result<(), CompareError> {
        check_threshold("similarity_threshold", self.similarity_threshold)?;
        check_threshold("move_detection_threshold", self.move_detection_threshold)?;
        check_threshold("unchanged_threshold", self.unchanged_threshold)?;
        if self.critical_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(CompareError::EmptyKeyword);
        }
        Ok(())
    }
}

fn check_threshold(name: &'static str, value: f32) -> Result<(), CompareError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(CompareError::InvalidThreshold { name, value })
    }
}

/// Validated comparison pipeline. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct Comparator {
    config: CompareConfig,
    classifier: SeverityClassifier,
}

impl Comparator {
    pub fn new(config: CompareConfig) -> Result<Self, CompareError> {
        config.validate()?;
        let classifier = SeverityClassifier::new(&config.critical_keywords);
        Ok(Self { config, classifier })
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Embed both documents and compare them.
    ///
    /// Paragraphs the embedder cannot handle take part with zero similarity.
    pub fn compare<S: AsRef<str>>(
        &self,
        embedder: &mut Embedder,
        old_paragraphs: &[S],
        new_paragraphs: &[S],
    ) -> Result<ComparisonResult, CompareError> {
        debug!(
            old = old_paragraphs.len(),
            new = new_paragraphs.len(),
            model = embedder.model_id(),
            "embedding documents"
        );
        let old_embeddings = embedder.embed_batch(old_paragraphs);
        let new_embeddings = embedder.embed_batch(new_paragraphs);
        self.compare_embeddings(old_paragraphs, new_paragraphs, &old_embeddings, &new_embeddings)
    }

    /// Compare documents whose embeddings are already known.
    ///
    /// `old_embeddings[i]` belongs to `old_paragraphs[i]`; `None` marks a
    /// paragraph that could not be embedded.
    pub fn compare_embeddings<S: AsRef<str>>(
        &self,
        old_paragraphs: &[S],
        new_paragraphs: &[S],
        old_embeddings: &[Option<Embedding>],
        new_embeddings: &[Option<Embedding>],
    ) -> Result<ComparisonResult, CompareError> {
        check_lengths("old", old_paragraphs.len(), old_embeddings.len())?;
        check_lengths("new", new_paragraphs.len(), new_embeddings.len())?;

        let matrix = SimilarityMatrix::build(old_embeddings, new_embeddings);
        debug!(rows = matrix.rows(), cols = matrix.cols(), "similarity matrix built");

        self.compare_matrix(old_paragraphs, new_paragraphs, &matrix)
    }

    /// Run matching and annotation over a prepared similarity matrix.
    ///
    /// The matrix must be `old_paragraphs.len() x new_paragraphs.len()`.
    pub fn compare_matrix<S: AsRef<str>>(
        &self,
        old_paragraphs: &[S],
        new_paragraphs: &[S],
        matrix: &SimilarityMatrix,
    ) -> Result<ComparisonResult, CompareError> {
        if matrix.rows() != old_paragraphs.len() || matrix.cols() != new_paragraphs.len() {
            return Err(CompareError::MatrixShape {
                rows: matrix.rows(),
                cols: matrix.cols(),
                old: old_paragraphs.len(),
                new: new_paragraphs.len(),
            });
        }

        let options = MatcherOptions {
            similarity_threshold: self.config.similarity_threshold,
            unchanged_threshold: self.config.unchanged_threshold,
            strategy: self.config.strategy,
        };
        let mut matches = matcher::find_matches(old_paragraphs, new_paragraphs, matrix, &options);

        let moved = moves::detect_moves(
            &mut matches,
            self.config.move_detection_threshold,
            self.config.move_distance,
        );
        debug!(moved, "move detection finished");

        self.classifier.classify(&mut matches);

        let result = aggregate::build_result(matches, old_paragraphs.len(), new_paragraphs.len());
        let s = &result.summary;
        info!(
            unchanged = s.unchanged,
            modified = s.modified,
            added = s.added,
            deleted = s.deleted,
            moved = s.moved,
            critical = result.critical_changes.len(),
            average_similarity = s.average_similarity,
            "comparison finished"
        );
        Ok(result)
    }
}

fn check_lengths(side: &'static str, texts: usize, embeddings: usize) -> Result<(), CompareError> {
    if texts == embeddings {
        Ok(())
    } else {
        Err(CompareError::LengthMismatch {
            side,
            texts,
            embeddings,
        })
    }
}

/// One-shot comparison with explicit thresholds and keywords.
///
/// `critical_keywords` of `None` selects the defaults.
pub fn compare<S: AsRef<str>>(
    old_paragraphs: &[S],
    new_paragraphs: &[S],
    similarity_threshold: f32,
    move_detection_threshold: f32,
    critical_keywords: Option<Vec<String>>,
    embedder: &mut Embedder,
) -> Result<ComparisonResult, CompareError> {
    let mut config = CompareConfig {
        similarity_threshold,
        move_detection_threshold,
        ..CompareConfig::default()
    };
    if let Some(keywords) = critical_keywords {
        config.critical_keywords = keywords;
    }
    Comparator::new(config)?.compare(embedder, old_paragraphs, new_paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingProvider;

    fn one_hot(dim: usize, idx: usize) -> Vec<f32> {
        let mut v = vec![0.0; dim];
        v[idx] = 1.0;
        v
    }

    fn embeddings(texts: &[&str], vectors: Vec<Vec<f32>>) -> Vec<Option<Embedding>> {
        texts
            .iter()
            .zip(vectors)
            .map(|(t, v)| Some(Embedding::new(*t, v, "test")))
            .collect()
    }

    fn comparator() -> Comparator {
        Comparator::new(CompareConfig::default()).unwrap()
    }

    fn assert_complete(result: &ComparisonResult, n_old: usize, n_new: usize) {
        let mut seen_old = vec![0usize; n_old];
        let mut seen_new = vec![0usize; n_new];
        for m in &result.matches {
            if let Some(i) = m.old_index {
                seen_old[i] += 1;
            }
            if let Some(j) = m.new_index {
                seen_new[j] += 1;
            }
        }
        assert!(seen_old.iter().all(|c| *c == 1), "old indices: {:?}", seen_old);
        assert!(seen_new.iter().all(|c| *c == 1), "new indices: {:?}", seen_new);
    }

    #[test]
    fn test_identity() {
        let texts = ["Alpha paragraph.", "Beta paragraph.", "Gamma paragraph."];
        let vectors: Vec<Vec<f32>> = (0..3).map(|i| one_hot(3, i)).collect();
        let embs = embeddings(&texts, vectors);

        let result = comparator()
            .compare_embeddings(&texts, &texts, &embs, &embs)
            .unwrap();

        assert_eq!(result.matches.len(), 3);
        assert!(result.is_identical());
        assert_eq!(result.summary.unchanged, 3);
        assert_eq!(result.summary.average_similarity, 1.0);
        for (i, m) in result.matches.iter().enumerate() {
            assert_eq!(m.old_index, Some(i));
            assert_eq!(m.new_index, Some(i));
            assert_eq!(m.severity, ChangeSeverity::Trivial);
            assert_eq!(m.explanation, "No changes detected");
        }
        assert!(result.critical_changes.is_empty());
        assert!(result.major_changes.is_empty());
    }

    #[test]
    fn test_pure_addition() {
        let empty: [&str; 0] = [];
        let new = ["First.", "Second."];
        let new_embs = embeddings(&new, vec![one_hot(2, 0), one_hot(2, 1)]);

        let result = comparator()
            .compare_embeddings(&empty, &new, &[], &new_embs)
            .unwrap();

        assert_eq!(result.summary.added, 2);
        assert_eq!(result.summary.average_similarity, 0.0);
        assert_eq!(result.major_changes.len(), 2);
        assert_eq!(result.matches[1].explanation, "New paragraph added at position 2");
    }

    #[test]
    fn test_pure_deletion() {
        let old = ["First.", "Second."];
        let empty: [&str; 0] = [];
        let old_embs = embeddings(&old, vec![one_hot(2, 0), one_hot(2, 1)]);

        let result = comparator()
            .compare_embeddings(&old, &empty, &old_embs, &[])
            .unwrap();

        assert_eq!(result.summary.deleted, 2);
        assert!(result.matches.iter().all(|m| m.severity == ChangeSeverity::Major));
        assert_eq!(result.matches[0].explanation, "Paragraph removed from position 1");
    }

    #[test]
    fn test_both_empty() {
        let empty: [&str; 0] = [];
        let result = comparator()
            .compare_embeddings(&empty, &empty, &[], &[])
            .unwrap();
        assert!(result.matches.is_empty());
        assert_eq!(result.summary, ComparisonSummary::default());
    }

    #[test]
    fn test_simple_modification() {
        let old = ["The system should be fast."];
        let new = ["The system will be fast."];
        let matrix = SimilarityMatrix::from_rows(vec![vec![0.8]]);

        let result = comparator().compare_matrix(&old, &new, &matrix).unwrap();
        let m = &result.matches[0];
        assert_eq!(m.change_type, ChangeType::Modified);
        assert_eq!(m.severity, ChangeSeverity::Minor);
        assert_eq!(m.explanation, "Content modified (similarity: 80.0%)");
    }

    #[test]
    fn test_keyword_makes_near_identical_critical() {
        let old = ["The vendor must deliver on time."];
        let new = ["The vendor must deliver in time."];
        let matrix = SimilarityMatrix::from_rows(vec![vec![0.94]]);

        let result = comparator().compare_matrix(&old, &new, &matrix).unwrap();
        assert_eq!(result.matches[0].change_type, ChangeType::Modified);
        assert_eq!(result.matches[0].severity, ChangeSeverity::Critical);
        assert_eq!(result.critical_changes.len(), 1);

        // Unchanged pairs stay trivial even with a keyword.
        let matrix = SimilarityMatrix::from_rows(vec![vec![0.97]]);
        let result = comparator().compare_matrix(&old, &new, &matrix).unwrap();
        assert_eq!(result.matches[0].change_type, ChangeType::Unchanged);
        assert_eq!(result.matches[0].severity, ChangeSeverity::Trivial);
    }

    #[test]
    fn test_threshold_boundary() {
        let old = ["a"];
        let new = ["b"];

        let matrix = SimilarityMatrix::from_rows(vec![vec![0.75]]);
        let result = comparator().compare_matrix(&old, &new, &matrix).unwrap();
        assert_eq!(result.summary.modified, 1);

        let matrix = SimilarityMatrix::from_rows(vec![vec![0.75 - 1e-4]]);
        let result = comparator().compare_matrix(&old, &new, &matrix).unwrap();
        assert_eq!(result.summary.deleted, 1);
        assert_eq!(result.summary.added, 1);
        assert_eq!(result.matches.len(), 2);
    }

    #[test]
    fn test_move_boundary() {
        let old = ["p0", "p1", "p2", "p3"];
        let new = ["q0", "q1", "q2", "q3"];

        // old 0 -> new 3 at 0.90, distance 3.
        let mut rows = vec![vec![0.0; 4]; 4];
        rows[0][3] = 0.90;
        rows[1][0] = 0.99;
        rows[2][1] = 0.99;
        rows[3][2] = 0.99;
        let result = comparator()
            .compare_matrix(&old, &new, &SimilarityMatrix::from_rows(rows))
            .unwrap();
        let m = &result.matches[0];
        assert_eq!(m.change_type, ChangeType::Moved);
        assert!(m.is_moved);
        assert_eq!(m.explanation, "Paragraph moved from position 1 to 4");
        assert_eq!(result.summary.moved, 1);

        // Same similarity at distance 2 stays modified.
        let mut rows = vec![vec![0.0; 4]; 4];
        rows[0][2] = 0.90;
        rows[1][0] = 0.99;
        rows[2][1] = 0.99;
        rows[3][3] = 0.99;
        let result = comparator()
            .compare_matrix(&old, &new, &SimilarityMatrix::from_rows(rows))
            .unwrap();
        assert_eq!(result.matches[0].change_type, ChangeType::Modified);
        assert!(!result.matches[0].is_moved);
    }

    #[test]
    fn test_reorder_prefers_global_optimum() {
        let old = ["A", "B"];
        let new = ["X", "Y"];
        // Greedy would take (0,0) at 0.9 and leave (1,1) at 0.1.
        let matrix = SimilarityMatrix::from_rows(vec![vec![0.9, 0.85], vec![0.8, 0.1]]);

        let result = comparator().compare_matrix(&old, &new, &matrix).unwrap();
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].new_index, Some(1));
        assert_eq!(result.matches[1].new_index, Some(0));
        assert_eq!(result.summary.modified, 2);
    }

    #[test]
    fn test_reorder_scenario() {
        // [A, B, C, D] -> [D, A, B, C]
        let old = ["A", "B", "C", "D"];
        let new = ["D", "A", "B", "C"];
        let mut rows = vec![vec![0.2; 4]; 4];
        rows[0][1] = 0.95;
        rows[1][2] = 0.95;
        rows[2][3] = 0.95;
        rows[3][0] = 0.95;

        let result = comparator()
            .compare_matrix(&old, &new, &SimilarityMatrix::from_rows(rows))
            .unwrap();
        assert_complete(&result, 4, 4);
        assert_eq!(result.matches.len(), 4);
        assert_eq!(result.summary.moved, 1);
        assert_eq!(result.summary.modified, 3);

        let d = &result.matches[3];
        assert_eq!((d.old_index, d.new_index), (Some(3), Some(0)));
        assert_eq!(d.change_type, ChangeType::Moved);
        assert_eq!(d.explanation, "Paragraph moved from position 4 to 1");
        for m in &result.matches[..3] {
            assert_eq!(m.new_index, m.old_index.map(|i| i + 1));
            assert_eq!(m.change_type, ChangeType::Modified);
            assert!(!m.is_moved);
        }
    }

    #[test]
    fn test_matrix_shape_mismatch_rejected() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![0.9, 0.1], vec![0.1, 0.9]]);
        let err = comparator()
            .compare_matrix(&["only one"], &["a", "b"], &matrix)
            .unwrap_err();
        assert_eq!(
            err,
            CompareError::MatrixShape {
                rows: 2,
                cols: 2,
                old: 1,
                new: 2
            }
        );

        let err = comparator()
            .compare_matrix(&["a", "b"], &["a", "b", "c"], &matrix)
            .unwrap_err();
        assert!(matches!(err, CompareError::MatrixShape { cols: 2, new: 3, .. }));
    }

    #[test]
    fn test_injective_and_complete_on_rectangular_input() {
        let old = ["o0", "o1", "o2", "o3", "o4"];
        let new = ["n0", "n1", "n2"];
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![0.9, 0.9, 0.2],
            vec![0.9, 0.9, 0.9],
            vec![0.1, 0.8, 0.95],
            vec![0.99, 0.0, 0.0],
            vec![0.3, 0.3, 0.3],
        ]);

        for strategy in [MatchStrategy::Optimal, MatchStrategy::Greedy] {
            let config = CompareConfig {
                strategy,
                ..CompareConfig::default()
            };
            let result = Comparator::new(config)
                .unwrap()
                .compare_matrix(&old, &new, &matrix)
                .unwrap();
            assert_complete(&result, 5, 3);
            let paired = result
                .matches
                .iter()
                .filter(|m| m.old_index.is_some() && m.new_index.is_some())
                .count();
            assert_eq!(paired, 3);
            assert_eq!(result.summary.deleted, 2);
        }
    }

    #[test]
    fn test_missing_embeddings_become_add_and_delete() {
        let old = ["kept", "lost"];
        let new = ["kept", "lost"];
        let old_embs = vec![Some(Embedding::new("kept", one_hot(2, 0), "t")), None];
        let new_embs = embeddings(&new, vec![one_hot(2, 0), one_hot(2, 1)]);

        let result = comparator()
            .compare_embeddings(&old, &new, &old_embs, &new_embs)
            .unwrap();
        assert_eq!(result.summary.unchanged, 1);
        assert_eq!(result.summary.deleted, 1);
        assert_eq!(result.summary.added, 1);
        assert_complete(&result, 2, 2);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let texts = ["a", "b"];
        let embs = embeddings(&["a"], vec![one_hot(1, 0)]);
        let err = comparator()
            .compare_embeddings(&texts, &texts, &embs, &embs)
            .unwrap_err();
        assert_eq!(
            err,
            CompareError::LengthMismatch {
                side: "old",
                texts: 2,
                embeddings: 1
            }
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        for bad in [0.0, -0.1, 1.01, f32::NAN, f32::INFINITY] {
            let config = CompareConfig {
                similarity_threshold: bad,
                ..CompareConfig::default()
            };
            assert!(matches!(
                Comparator::new(config),
                Err(CompareError::InvalidThreshold {
                    name: "similarity_threshold",
                    ..
                })
            ));
        }

        let config = CompareConfig {
            move_detection_threshold: 1.0,
            ..CompareConfig::default()
        };
        assert!(Comparator::new(config).is_ok());

        let config = CompareConfig {
            critical_keywords: vec!["must".into(), "  ".into()],
            ..CompareConfig::default()
        };
        assert_eq!(Comparator::new(config).unwrap_err(), CompareError::EmptyKeyword);
    }

    #[test]
    fn test_compare_with_embedder() {
        let mut embedder = Embedder::new(Box::new(HashingProvider::default()), true);
        let old = [
            "The contractor shall deliver the report by Friday.",
            "Meetings happen every Monday morning.",
        ];
        let new = [
            "Meetings happen every Monday morning.",
            "The contractor shall deliver the report by Friday.",
            "Parking is available behind the building.",
        ];

        let result = compare(&old, &new, 0.75, 0.85, None, &mut embedder).unwrap();
        assert_complete(&result, 2, 3);
        assert_eq!(result.summary.unchanged, 2);
        assert_eq!(result.summary.added, 1);
        assert_eq!(result.matches[0].new_index, Some(1));
        assert_eq!(result.matches[1].new_index, Some(0));
        assert_eq!(result.matches[2].change_type, ChangeType::Added);

        let err = compare(&old, &new, 2.0, 0.85, None, &mut embedder).unwrap_err();
        assert!(matches!(err, CompareError::InvalidThreshold { .. }));
    }

    #[test]
    fn test_comparator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Comparator>();
    }
}
