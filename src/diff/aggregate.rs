// SPDX-License-Identifier: MIT OR Apache-2.0

//! Final pass: explanations, counts and the critical/major sub-lists.

use crate::diff::types::{
    ChangeSeverity, ChangeType, ComparisonResult, ComparisonSummary, ParagraphMatch,
};

/// Templated, human-readable description of one match. Positions are 1-based.
pub fn explain(m: &ParagraphMatch) -> String {
    let pos = |idx: Option<usize>| idx.map(|i| i + 1).unwrap_or(0);
    match m.change_type {
        ChangeType::Unchanged => "No changes detected".to_string(),
        ChangeType::Added => format!("New paragraph added at position {}", pos(m.new_index)),
        ChangeType::Deleted => format!("Paragraph removed from position {}", pos(m.old_index)),
        ChangeType::Moved => format!(
            "Paragraph moved from position {} to {}",
            pos(m.old_index),
            pos(m.new_index)
        ),
        ChangeType::Modified => format!(
            "Content modified (similarity: {:.1}%)",
            m.similarity * 100.0
        ),
    }
}

/// Attach explanations and assemble the result.
pub fn build_result(
    mut matches: Vec<ParagraphMatch>,
    total_old: usize,
    total_new: usize,
) -> ComparisonResult {
    let mut summary = ComparisonSummary {
        total_old,
        total_new,
        ..Default::default()
    };
    let mut critical_changes = Vec::new();
    let mut major_changes = Vec::new();
    let mut similarity_sum = 0.0f64;

    for m in matches.iter_mut() {
        m.explanation = explain(m);

        match m.change_type {
            ChangeType::Unchanged => summary.unchanged += 1,
            ChangeType::Modified => summary.modified += 1,
            ChangeType::Added => summary.added += 1,
            ChangeType::Deleted => summary.deleted += 1,
            ChangeType::Moved => summary.moved += 1,
        }
        similarity_sum += f64::from(m.similarity);

        match m.severity {
            ChangeSeverity::Critical => critical_changes.push(m.clone()),
            ChangeSeverity::Major => major_changes.push(m.clone()),
            ChangeSeverity::Minor | ChangeSeverity::Trivial => {}
        }
    }

    if !matches.is_empty() {
        summary.average_similarity = (similarity_sum / matches.len() as f64) as f32;
    }

    ComparisonResult {
        summary,
        matches,
        critical_changes,
        major_changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explanations() {
        let unchanged = ParagraphMatch::paired(0, 0, "a", "a", 1.0, 0.95);
        assert_eq!(explain(&unchanged), "No changes detected");

        assert_eq!(
            explain(&ParagraphMatch::added(2, "x")),
            "New paragraph added at position 3"
        );
        assert_eq!(
            explain(&ParagraphMatch::deleted(0, "x")),
            "Paragraph removed from position 1"
        );

        let mut moved = ParagraphMatch::paired(0, 4, "a", "b", 0.9, 0.95);
        moved.change_type = ChangeType::Moved;
        assert_eq!(explain(&moved), "Paragraph moved from position 1 to 5");

        let modified = ParagraphMatch::paired(0, 0, "a", "b", 0.8137, 0.95);
        assert_eq!(explain(&modified), "Content modified (similarity: 81.4%)");
    }

    #[test]
    fn test_build_result_counts_and_lists() {
        let mut critical = ParagraphMatch::paired(0, 0, "must", "shall", 0.8, 0.95);
        critical.severity = ChangeSeverity::Critical;
        let mut major = ParagraphMatch::deleted(1, "gone");
        major.severity = ChangeSeverity::Major;
        let mut added = ParagraphMatch::added(1, "new");
        added.severity = ChangeSeverity::Major;
        let mut trivial = ParagraphMatch::paired(2, 2, "same", "same", 1.0, 0.95);
        trivial.severity = ChangeSeverity::Trivial;

        let result = build_result(vec![critical, major, added, trivial], 3, 3);
        let s = &result.summary;

        assert_eq!((s.total_old, s.total_new), (3, 3));
        assert_eq!(s.modified, 1);
        assert_eq!(s.deleted, 1);
        assert_eq!(s.added, 1);
        assert_eq!(s.unchanged, 1);
        assert_eq!(s.moved, 0);
        assert!((s.average_similarity - 0.45).abs() < 1e-6);

        assert_eq!(result.critical_changes.len(), 1);
        assert_eq!(result.major_changes.len(), 2);
        assert_eq!(result.major_changes[0].change_type, ChangeType::Deleted);
        assert_eq!(result.major_changes[1].change_type, ChangeType::Added);
        assert!(result.matches.iter().all(|m| !m.explanation.is_empty()));
        assert_eq!(result.critical_changes[0], result.matches[0]);
    }

    #[test]
    fn test_empty_result() {
        let result = build_result(Vec::new(), 0, 0);
        assert_eq!(result.summary.average_similarity, 0.0);
        assert!(result.matches.is_empty());
        assert!(result.is_identical());
    }
}
