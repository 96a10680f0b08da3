// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reclassifies near-identical pairs that changed position as moves.

use crate::diff::types::{ChangeType, ParagraphMatch};

/// Mark modified pairs as moved when they are at least
/// `move_threshold` similar and shifted by more than `max_local_shift`
/// positions. Returns the number of moves found.
pub fn detect_moves(
    matches: &mut [ParagraphMatch],
    move_threshold: f32,
    max_local_shift: usize,
) -> usize {
    let mut moved = 0;
    for m in matches
        .iter_mut()
        .filter(|m| m.change_type == ChangeType::Modified)
    {
        if m.similarity < move_threshold {
            continue;
        }
        if m.position_shift().is_some_and(|shift| shift > max_local_shift) {
            m.change_type = ChangeType::Moved;
            m.is_moved = true;
            moved += 1;
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(old: usize, new: usize, sim: f32) -> ParagraphMatch {
        ParagraphMatch::paired(old, new, "a", "b", sim, 0.95)
    }

    #[test]
    fn test_move_distance_boundary() {
        let mut matches = vec![pair(0, 3, 0.90), pair(1, 3, 0.90)];
        assert_eq!(detect_moves(&mut matches, 0.85, 2), 1);

        assert_eq!(matches[0].change_type, ChangeType::Moved);
        assert!(matches[0].is_moved);
        assert_eq!(matches[1].change_type, ChangeType::Modified);
        assert!(!matches[1].is_moved);
    }

    #[test]
    fn test_move_similarity_boundary() {
        let mut matches = vec![pair(5, 0, 0.85), pair(6, 0, 0.8499)];
        detect_moves(&mut matches, 0.85, 2);
        assert_eq!(matches[0].change_type, ChangeType::Moved);
        assert_eq!(matches[1].change_type, ChangeType::Modified);
    }

    #[test]
    fn test_other_types_untouched() {
        let mut matches = vec![
            pair(0, 9, 0.99),
            ParagraphMatch::added(9, "x"),
            ParagraphMatch::deleted(0, "y"),
        ];
        assert_eq!(matches[0].change_type, ChangeType::Unchanged);
        assert_eq!(detect_moves(&mut matches, 0.85, 2), 0);
        assert_eq!(matches[0].change_type, ChangeType::Unchanged);
        assert_eq!(matches[1].change_type, ChangeType::Added);
        assert_eq!(matches[2].change_type, ChangeType::Deleted);
    }
}
