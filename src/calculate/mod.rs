//! Statistics calculation engine.
//!
//! Computes derived metrics from a (usually filtered) list of games:
//! - Filter predicates over the dashboard criteria
//! - Player and faction win rates, global averages
//! - Cumulative win-rate timelines and participation periods
//! - Win rate by starting position against the uniform baseline
//! - Best / most played faction selection
//! - Round count distribution
//!
//! Every function here is pure. Functions taking a list of games accept any
//! slice of `Game` or `&Game`, so filtered results can be passed straight on.

use std::borrow::Borrow;

use crate::models::Game;

mod aggregate;
mod filter;
mod periods;
mod position;
mod ranking;
mod rounds;
mod timeline;

pub use aggregate::aggregate;
pub use filter::{active_filter_count, filter_games, matches};
pub use periods::{activity_overview, participation_periods, DEFAULT_PERIOD_GAP_DAYS};
pub use position::position_stats;
pub use ranking::{best_faction, faction_leaderboard, most_played_faction, player_leaderboard};
pub use rounds::round_distribution;
pub use timeline::win_rate_timeline;

/// Iterate over a slice of games or game references.
pub(crate) fn iter_games<G: Borrow<Game>>(games: &[G]) -> impl Iterator<Item = &Game> + Clone {
    games.iter().map(|g| <G as Borrow<Game>>::borrow(g))
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

/// `total / count`, or 0 when `count` is 0.
pub fn ratio(total: u32, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Round to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared game builders for engine tests.

    use chrono::{Duration, NaiveDate};

    use crate::models::{Game, Participation};

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Date `days` after 2024-01-01.
    pub fn day(days: i64) -> NaiveDate {
        date("2024-01-01") + Duration::days(days)
    }

    pub fn seat(player: &str, faction: &str, points: u32) -> Participation {
        Participation::new(player)
            .with_points(points)
            .with_faction(faction, format!("The {}", faction))
    }

    pub fn game(id: &str, start: NaiveDate, seats: Vec<Participation>) -> Game {
        let mut game = Game::new(id, format!("Game {}", id), start, 10);
        for s in seats {
            game = game.with_participant(s);
        }
        game
    }

    /// Four seats scoring 10/8/6/4, first seat wins.
    pub fn four_player_game(id: &str, start: NaiveDate) -> Game {
        game(
            id,
            start,
            vec![
                seat("Manu", "Hacan", 10).at_position(1).as_winner(),
                seat("Thomas", "Sol", 8).at_position(2),
                seat("Eric", "Jol", 6).at_position(3),
                seat("Frank", "Naalu", 4).at_position(4),
            ],
        )
    }
}
