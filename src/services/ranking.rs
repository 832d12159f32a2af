//! Winner-takes-a-point ranking update.

use crate::state::group::{MatchResult, PlayerTable, TieBreak};

/// Fold a match into `table` and return the updated table sorted for display.
///
/// The winner gains one point (starting from 0 when unknown), every other
/// participant missing from the table is added at 0, and all remaining
/// entries keep their score. Applying the same result twice scores twice.
pub fn apply_result(table: &PlayerTable, result: &MatchResult, tie_break: TieBreak) -> PlayerTable {
    let mut next = table.clone();
    next.increment(result.winner());
    for other in result.others() {
        next.ensure(other.clone());
    }
    next.sorted(tie_break)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u32)]) -> PlayerTable {
        entries
            .iter()
            .map(|(name, score)| (name.to_string(), *score))
            .collect()
    }

    fn result(players: &[&str]) -> MatchResult {
        MatchResult::new(players).unwrap()
    }

    #[test]
    fn winner_gains_exactly_one_point() {
        let before = table(&[("Alice", 0), ("Bob", 0)]);
        let after = apply_result(&before, &result(&["Alice", "Bob"]), TieBreak::Alphabetical);

        assert_eq!(after.score("Alice"), Some(1));
        assert_eq!(after.score("Bob"), Some(0));
        assert_eq!(after.names().collect::<Vec<_>>(), ["Alice", "Bob"]);
    }

    #[test]
    fn new_winner_and_losers_are_inserted() {
        let before = table(&[("Alice", 4)]);
        let after = apply_result(
            &before,
            &result(&["Dora", "Eve", "Alice", "Finn"]),
            TieBreak::Alphabetical,
        );

        assert_eq!(after.score("Dora"), Some(1));
        assert_eq!(after.score("Eve"), Some(0));
        assert_eq!(after.score("Finn"), Some(0));
        assert_eq!(after.score("Alice"), Some(4));
        assert_eq!(after.len(), 4);
    }

    #[test]
    fn bystanders_keep_their_scores() {
        let before = table(&[("Alice", 2), ("Bob", 5), ("Carol", 1)]);
        let after = apply_result(&before, &result(&["Carol", "Alice"]), TieBreak::Alphabetical);

        assert_eq!(after.score("Bob"), Some(5));
        assert_eq!(after.score("Alice"), Some(2));
        assert_eq!(after.score("Carol"), Some(2));
    }

    #[test]
    fn new_leader_moves_to_the_top() {
        let before = table(&[("Alice", 2), ("Bob", 2)]);
        let after = apply_result(&before, &result(&["Bob", "Alice"]), TieBreak::Alphabetical);

        assert_eq!(after.names().collect::<Vec<_>>(), ["Bob", "Alice"]);
        assert_eq!(after.score("Bob"), Some(3));
    }

    #[test]
    fn reapplying_a_result_scores_again() {
        let start = table(&[("Alice", 0), ("Bob", 0)]);
        let outcome = result(&["Alice", "Bob"]);
        let once = apply_result(&start, &outcome, TieBreak::Insertion);
        let twice = apply_result(&once, &outcome, TieBreak::Insertion);

        assert_eq!(twice.score("Alice"), Some(2));
    }

    #[test]
    fn input_table_is_left_untouched() {
        let before = table(&[("Alice", 1)]);
        let _ = apply_result(&before, &result(&["Bob", "Alice"]), TieBreak::Alphabetical);

        assert_eq!(before, table(&[("Alice", 1)]));
        assert!(!before.contains("Bob"));
    }

    #[test]
    fn output_is_sorted_non_increasing() {
        let before = table(&[("A", 0), ("B", 3), ("C", 1), ("D", 3)]);
        let after = apply_result(&before, &result(&["C", "A"]), TieBreak::Insertion);

        let scores = after.iter().map(|(_, score)| score).collect::<Vec<_>>();
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(after.names().collect::<Vec<_>>(), ["B", "D", "C", "A"]);
    }
}
