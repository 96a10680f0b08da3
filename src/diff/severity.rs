// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity rating of detected changes.

use crate::diff::types::{ChangeSeverity, ChangeType, ParagraphMatch};

/// Requirement, legal and compliance markers that make a change critical.
pub const DEFAULT_CRITICAL_KEYWORDS: &[&str] = &[
    "must",
    "shall",
    "required",
    "mandatory",
    "legal",
    "compliance",
    "regulation",
    "contract",
    "agreement",
    "liability",
    "confidential",
    "proprietary",
    "patent",
];

/// Similarity below which a paired change is major.
pub const MAJOR_SIMILARITY: f32 = 0.5;
/// Similarity below which a paired change is minor; at or above it is trivial.
pub const MINOR_SIMILARITY: f32 = 0.85;

/// Assigns a severity to every match
#[derive(Debug, Clone)]
pub struct SeverityClassifier {
    /// Lower-cased keywords
    keywords: Vec<String>,
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_CRITICAL_KEYWORDS.iter().copied())
    }
}

impl SeverityClassifier {
    /// Create a classifier with the given critical keywords. Blank entries are ignored.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// First critical keyword found in either text (case-insensitive substring).
    pub fn critical_keyword(&self, m: &ParagraphMatch) -> Option<&str> {
        let old = m.old_text.to_lowercase();
        let new = m.new_text.to_lowercase();
        self.keywords
            .iter()
            .find(|k| old.contains(k.as_str()) || new.contains(k.as_str()))
            .map(String::as_str)
    }

    /// Severity of one match; the first rule that applies wins.
    pub fn severity_of(&self, m: &ParagraphMatch) -> ChangeSeverity {
        if m.change_type == ChangeType::Unchanged {
            return ChangeSeverity::Trivial;
        }
        if self.critical_keyword(m).is_some() {
            return ChangeSeverity::Critical;
        }
        if matches!(m.change_type, ChangeType::Added | ChangeType::Deleted) {
            return ChangeSeverity::Major;
        }
        if m.similarity < MAJOR_SIMILARITY {
            ChangeSeverity::Major
        } else if m.similarity < MINOR_SIMILARITY {
            ChangeSeverity::Minor
        } else {
            ChangeSeverity::Trivial
        }
    }

    /// Annotate every match in place.
    pub fn classify(&self, matches: &mut [ParagraphMatch]) {
        for m in matches.iter_mut() {
            m.severity = self.severity_of(m);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modified(old: &str, new: &str, sim: f32) -> ParagraphMatch {
        ParagraphMatch::paired(0, 0, old, new, sim, 0.95)
    }

    #[test]
    fn test_unchanged_is_trivial_even_with_keyword() {
        let classifier = SeverityClassifier::default();
        let m = modified("You must comply.", "You must comply.", 0.99);
        assert_eq!(classifier.severity_of(&m), ChangeSeverity::Trivial);
    }

    #[test]
    fn test_keyword_outranks_similarity() {
        let classifier = SeverityClassifier::default();
        let m = modified("The system should be fast.", "The system MUST be fast.", 0.9);
        assert_eq!(classifier.severity_of(&m), ChangeSeverity::Critical);
        assert_eq!(classifier.critical_keyword(&m), Some("must"));
    }

    #[test]
    fn test_added_deleted_are_major() {
        let classifier = SeverityClassifier::default();
        assert_eq!(
            classifier.severity_of(&ParagraphMatch::added(0, "A new section.")),
            ChangeSeverity::Major
        );
        assert_eq!(
            classifier.severity_of(&ParagraphMatch::deleted(0, "Confidential data.")),
            ChangeSeverity::Critical
        );
    }

    #[test]
    fn test_similarity_tiers() {
        let classifier = SeverityClassifier::default();
        assert_eq!(classifier.severity_of(&modified("a", "b", 0.49)), ChangeSeverity::Major);
        assert_eq!(classifier.severity_of(&modified("a", "b", 0.5)), ChangeSeverity::Minor);
        assert_eq!(classifier.severity_of(&modified("a", "b", 0.84)), ChangeSeverity::Minor);
        assert_eq!(classifier.severity_of(&modified("a", "b", 0.85)), ChangeSeverity::Trivial);
    }

    #[test]
    fn test_moved_uses_similarity_rules() {
        let classifier = SeverityClassifier::default();
        let mut m = modified("a", "b", 0.9);
        m.change_type = ChangeType::Moved;
        assert_eq!(classifier.severity_of(&m), ChangeSeverity::Trivial);
    }

    #[test]
    fn test_custom_keywords() {
        let classifier = SeverityClassifier::new(["  Warranty ", ""]);
        assert_eq!(classifier.keywords().to_vec(), vec!["warranty".to_string()]);
        let m = modified("No WARRANTY is given.", "Shall apply.", 0.8);
        assert_eq!(classifier.severity_of(&m), ChangeSeverity::Critical);
        let m = modified("Nothing here.", "Shall apply.", 0.8);
        assert_eq!(classifier.severity_of(&m), ChangeSeverity::Minor);
    }

    #[test]
    fn test_classify_in_place() {
        let classifier = SeverityClassifier::default();
        let mut matches = vec![modified("a", "b", 0.3), ParagraphMatch::added(1, "c")];
        classifier.classify(&mut matches);
        assert_eq!(matches[0].severity, ChangeSeverity::Major);
        assert_eq!(matches[1].severity, ChangeSeverity::Major);
    }
}
