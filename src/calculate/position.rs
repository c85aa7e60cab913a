//! Win rate by starting position.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use super::{iter_games, percentage, round_one_decimal};
use crate::models::{Game, PositionReport, PositionStat};

#[derive(Default)]
struct SeatTotals {
    wins: u32,
    total: u32,
    expected_wins: f64,
}

/// Compare each starting position's win rate with the rate expected if
/// seat order made no difference.
///
/// Only seats with both a starting position and victory points are
/// eligible. In a game with N eligible seats each seat's a-priori win
/// chance is 1/N, which accumulates into the expected rate.
pub fn position_stats<G: Borrow<Game>>(games: &[G]) -> PositionReport {
    let mut seats: BTreeMap<u32, SeatTotals> = BTreeMap::new();

    for game in iter_games(games) {
        let eligible: Vec<_> = game
            .participants
            .iter()
            .filter(|p| p.participated())
            .filter_map(|p| p.starting_position.map(|pos| (pos, p.winner)))
            .collect();
        if eligible.is_empty() {
            continue;
        }

        let share = 1.0 / eligible.len() as f64;
        for (position, winner) in eligible {
            let totals = seats.entry(position).or_default();
            totals.total += 1;
            totals.expected_wins += share;
            if winner {
                totals.wins += 1;
            }
        }
    }

    let per_position: Vec<PositionStat> = seats
        .into_iter()
        .map(|(position, t)| PositionStat {
            position,
            win_rate: round_one_decimal(percentage(t.wins, t.total)),
            expected_rate: round_one_decimal(t.expected_wins / t.total as f64 * 100.0),
            wins: t.wins,
            total: t.total,
        })
        .collect();

    // Weighted by appearances, from the already rounded per-position rates.
    let entries: u32 = per_position.iter().map(|p| p.total).sum();
    let expected_sum: f64 = per_position
        .iter()
        .map(|p| p.expected_rate * p.total as f64 / 100.0)
        .sum();
    let overall_expected_rate = if entries > 0 {
        round_one_decimal(expected_sum / entries as f64 * 100.0)
    } else {
        0.0
    };

    PositionReport {
        per_position,
        overall_expected_rate,
    }
}
