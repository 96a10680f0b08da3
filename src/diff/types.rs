// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data model shared by every comparison stage.

use serde::{Deserialize, Serialize, Serializer};

/// Kind of change detected for a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Unchanged,
    Modified,
    Added,
    Deleted,
    Moved,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeType::Unchanged => write!(f, "unchanged"),
            ChangeType::Modified => write!(f, "modified"),
            ChangeType::Added => write!(f, "added"),
            ChangeType::Deleted => write!(f, "deleted"),
            ChangeType::Moved => write!(f, "moved"),
        }
    }
}

/// Impact of a change, ordered from least to most severe.
///
/// The derived `Ord` follows declaration order, so
/// `Critical > Major > Minor > Trivial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeSeverity {
    /// Formatting or near-identical content
    Trivial,
    /// Minor wording changes
    Minor,
    /// Significant content changes, additions and deletions
    Major,
    /// Requirement, legal or contractual language involved
    Critical,
}

impl std::fmt::Display for ChangeSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeSeverity::Trivial => write!(f, "trivial"),
            ChangeSeverity::Minor => write!(f, "minor"),
            ChangeSeverity::Major => write!(f, "major"),
            ChangeSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Alignment of one old paragraph, one new paragraph, or a pair of both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphMatch {
    /// Position in the old document (absent for additions)
    pub old_index: Option<usize>,
    /// Position in the new document (absent for deletions)
    pub new_index: Option<usize>,
    pub old_text: String,
    pub new_text: String,
    /// Similarity in [0, 1]; 0.0 for additions and deletions
    #[serde(serialize_with = "serialize_rounded")]
    pub similarity: f32,
    pub change_type: ChangeType,
    pub severity: ChangeSeverity,
    pub is_moved: bool,
    pub explanation: String,
}

impl ParagraphMatch {
    /// A matched pair. Scores strictly above `unchanged_threshold` count as unchanged.
    pub fn paired(
        old_index: usize,
        new_index: usize,
        old_text: &str,
        new_text: &str,
        similarity: f32,
        unchanged_threshold: f32,
    ) -> Self {
        let change_type = if similarity > unchanged_threshold {
            ChangeType::Unchanged
        } else {
            ChangeType::Modified
        };

        Self {
            old_index: Some(old_index),
            new_index: Some(new_index),
            old_text: old_text.to_string(),
            new_text: new_text.to_string(),
            similarity,
            change_type,
            severity: ChangeSeverity::Minor,
            is_moved: false,
            explanation: String::new(),
        }
    }

    /// An old paragraph with no counterpart.
    pub fn deleted(old_index: usize, old_text: &str) -> Self {
        Self {
            old_index: Some(old_index),
            new_index: None,
            old_text: old_text.to_string(),
            new_text: String::new(),
            similarity: 0.0,
            change_type: ChangeType::Deleted,
            severity: ChangeSeverity::Minor,
            is_moved: false,
            explanation: String::new(),
        }
    }

    /// A new paragraph with no counterpart.
    pub fn added(new_index: usize, new_text: &str) -> Self {
        Self {
            old_index: None,
            new_index: Some(new_index),
            old_text: String::new(),
            new_text: new_text.to_string(),
            similarity: 0.0,
            change_type: ChangeType::Added,
            severity: ChangeSeverity::Minor,
            is_moved: false,
            explanation: String::new(),
        }
    }

    /// Absolute positional distance between the two sides, if both exist.
    pub fn position_shift(&self) -> Option<usize> {
        match (self.old_index, self.new_index) {
            (Some(old), Some(new)) => Some(old.abs_diff(new)),
            _ => None,
        }
    }
}

/// Per-type counts and headline numbers of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_old: usize,
    pub total_new: usize,
    pub unchanged: usize,
    pub modified: usize,
    pub added: usize,
    pub deleted: usize,
    pub moved: usize,
    #[serde(serialize_with = "serialize_rounded")]
    pub average_similarity: f32,
}

impl ComparisonSummary {
    /// Number of matches of the given type.
    pub fn count(&self, change_type: ChangeType) -> usize {
        match change_type {
            ChangeType::Unchanged => self.unchanged,
            ChangeType::Modified => self.modified,
            ChangeType::Added => self.added,
            ChangeType::Deleted => self.deleted,
            ChangeType::Moved => self.moved,
        }
    }

    /// Total number of paragraphs that changed in any way.
    pub fn changed(&self) -> usize {
        self.modified + self.added + self.deleted + self.moved
    }
}

/// Complete, immutable outcome of one comparison call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub summary: ComparisonSummary,
    pub matches: Vec<ParagraphMatch>,
    pub critical_changes: Vec<ParagraphMatch>,
    pub major_changes: Vec<ParagraphMatch>,
}

impl ComparisonResult {
    /// True when every paragraph was matched unchanged.
    pub fn is_identical(&self) -> bool {
        self.summary.changed() == 0
    }
}

/// Scores are emitted with four decimals.
fn serialize_rounded<S>(value: &f32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let rounded = (f64::from(*value) * 10_000.0).round() / 10_000.0;
    serializer.serialize_f64(rounded)
}
