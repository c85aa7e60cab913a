//! Distribution of game lengths in rounds.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use super::{iter_games, percentage, round_one_decimal};
use crate::models::{Game, RoundBucket};

/// Count games per number of rounds, ascending by round.
///
/// Games without a recorded round count are left out of both the buckets
/// and the percentage base.
pub fn round_distribution<G: Borrow<Game>>(games: &[G]) -> Vec<RoundBucket> {
    let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
    for rounds in iter_games(games).filter_map(|g| g.rounds) {
        *counts.entry(rounds).or_default() += 1;
    }

    let total: u32 = counts.values().sum();
    counts
        .into_iter()
        .map(|(round, count)| RoundBucket {
            round,
            count,
            percentage: round_one_decimal(percentage(count, total)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::fixtures::{date, four_player_game};

    #[test]
    fn test_distribution() {
        let games = vec![
            four_player_game("1", date("2024-01-01")).with_rounds(6),
            four_player_game("2", date("2024-01-02")).with_rounds(5),
            four_player_game("3", date("2024-01-03")).with_rounds(6),
            four_player_game("4", date("2024-01-04")),
        ];

        let buckets = round_distribution(&games);
        let summary: Vec<_> = buckets.iter().map(|b| (b.round, b.count, b.percentage)).collect();
        assert_eq!(summary, vec![(5, 1, 33.3), (6, 2, 66.7)]);
    }

    #[test]
    fn test_no_rounds_recorded() {
        let games = vec![four_player_game("1", date("2024-01-01"))];
        assert!(round_distribution(&games).is_empty());
    }
}
