//! Player, faction and global statistics.

use std::borrow::Borrow;
use std::collections::HashMap;

use tracing::debug;

use super::{iter_games, ratio, round_one_decimal};
use crate::models::{FactionStat, Game, PlayerStat, StatsSummary};

/// Running totals keyed by name, remembering first-encountered order.
struct Tally<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V: Default> Tally<V> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn entry(&mut self, key: &str) -> &mut V {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

#[derive(Default)]
struct PlayerTotals {
    games: u32,
    wins: u32,
    points: u32,
}

#[derive(Default)]
struct FactionTotals {
    full_name: Option<String>,
    games: u32,
    wins: u32,
}

/// Aggregate statistics over `games`.
///
/// When `player_subset` is non-empty only those players' seats are counted,
/// for both player and faction statistics, which yields "personal"
/// faction win rates. Seats without victory points are skipped entirely.
pub fn aggregate<G: Borrow<Game>>(games: &[G], player_subset: &[String]) -> StatsSummary {
    if games.is_empty() {
        return StatsSummary::default();
    }

    let mut players: Tally<PlayerTotals> = Tally::new();
    let mut factions: Tally<FactionTotals> = Tally::new();
    let mut duration_sum = 0i64;
    let mut duration_count = 0u32;
    let mut rounds_sum = 0u32;
    let mut rounds_count = 0u32;

    for game in iter_games(games) {
        if let Some(days) = game.duration_days() {
            duration_sum += days;
            duration_count += 1;
        }

        // Zero means the round count was not recorded.
        if let Some(rounds) = game.rounds.filter(|r| *r > 0) {
            rounds_sum += rounds;
            rounds_count += 1;
        }

        for seat in &game.participants {
            let Some(points) = seat.victory_points else {
                continue;
            };
            if !player_subset.is_empty() && !player_subset.contains(&seat.player_name) {
                continue;
            }

            let player = players.entry(&seat.player_name);
            player.games += 1;
            player.points += points;
            if seat.winner {
                player.wins += 1;
            }

            if let Some(short) = &seat.faction_short {
                let faction = factions.entry(short);
                if faction.games == 0 {
                    faction.full_name = seat.faction_full.clone();
                }
                faction.games += 1;
                if seat.winner {
                    faction.wins += 1;
                }
            }
        }
    }

    let players: Vec<PlayerStat> = players
        .into_entries()
        .into_iter()
        .map(|(name, t)| PlayerStat::new(name, t.games, t.wins, t.points))
        .collect();

    let factions: Vec<FactionStat> = factions
        .into_entries()
        .into_iter()
        .map(|(short, t)| FactionStat::new(short, t.full_name, t.games, t.wins))
        .collect();

    let avg_duration_days = if duration_count > 0 {
        (duration_sum as f64 / duration_count as f64).round() as i64
    } else {
        0
    };

    debug!(
        games = games.len(),
        players = players.len(),
        factions = factions.len(),
        "Aggregated statistics"
    );

    StatsSummary {
        players,
        factions,
        total_games: games.len() as u32,
        avg_duration_days,
        avg_rounds: round_one_decimal(ratio(rounds_sum, rounds_count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::fixtures::{date, four_player_game, game, seat};
    use crate::models::Participation;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_four_player_game() {
        let games = vec![four_player_game("1", date("2024-01-01"))];
        let summary = aggregate(&games, &[]);

        assert_eq!(summary.total_games, 1);
        assert_eq!(summary.players.len(), 4);
        assert_eq!(summary.player("Manu").unwrap().win_rate, 100.0);
        assert_eq!(summary.player("Thomas").unwrap().win_rate, 0.0);
        assert_eq!(summary.player("Eric").unwrap().win_rate, 0.0);
        assert_eq!(summary.player("Frank").unwrap().avg_points, 4.0);
        assert_eq!(summary.faction("Hacan").unwrap().win_rate, 100.0);
        assert_eq!(summary.faction("Sol").unwrap().win_rate, 0.0);
    }

    #[test]
    fn test_empty_input_yields_zero_summary() {
        let games: Vec<Game> = Vec::new();
        assert_eq!(aggregate(&games, &[]), StatsSummary::default());
    }

    #[test]
    fn test_absent_seat_is_ignored_even_if_marked_winner() {
        let mut ghost = Participation::new("Steve").as_winner();
        ghost.faction_short = Some("Arborec".to_string());
        let games = vec![game(
            "1",
            date("2024-01-01"),
            vec![seat("Manu", "Sol", 7), ghost],
        )];

        let summary = aggregate(&games, &[]);
        assert!(summary.player("Steve").is_none());
        assert!(summary.faction("Arborec").is_none());
        assert_eq!(summary.player("Manu").unwrap().games, 1);
    }

    #[test]
    fn test_player_subset_applies_to_factions() {
        let games = vec![
            four_player_game("1", date("2024-01-01")),
            four_player_game("2", date("2024-01-08")),
        ];
        let subset = vec!["Thomas".to_string()];

        let summary = aggregate(&games, &subset);
        assert_eq!(summary.players.len(), 1);
        assert_eq!(summary.player("Thomas").unwrap().games, 2);
        assert_eq!(summary.factions.len(), 1);
        assert_eq!(summary.faction("Sol").unwrap().games, 2);
        assert_eq!(summary.total_games, 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let games = vec![
            game("1", date("2024-01-01"), vec![seat("Zed", "Yin", 10), seat("Amy", "Sol", 3)]),
            game("2", date("2024-01-02"), vec![seat("Bob", "Hacan", 10), seat("Amy", "Yin", 3)]),
        ];

        let summary = aggregate(&games, &[]);
        let players: Vec<_> = summary.players.iter().map(|p| p.name.as_str()).collect();
        let factions: Vec<_> = summary.factions.iter().map(|f| f.short_name.as_str()).collect();
        assert_eq!(players, vec!["Zed", "Amy", "Bob"]);
        assert_eq!(factions, vec!["Yin", "Sol", "Hacan"]);
    }

    #[test]
    fn test_faction_full_name_from_first_appearance() {
        let games = vec![game("1", date("2024-01-01"), vec![seat("Manu", "Sol", 10)])];
        let summary = aggregate(&games, &[]);
        assert_eq!(
            summary.faction("Sol").unwrap().full_name.as_deref(),
            Some("The Sol")
        );
    }

    #[test]
    fn test_duration_and_rounds_averages() {
        let games = vec![
            four_player_game("1", date("2024-01-01"))
                .with_end_date(date("2024-01-03"))
                .with_rounds(5),
            four_player_game("2", date("2024-02-01"))
                .with_end_date(date("2024-02-06"))
                .with_rounds(6),
            four_player_game("3", date("2024-03-01")).with_rounds(6),
            four_player_game("4", date("2024-04-01")),
        ];

        let summary = aggregate(&games, &[]);
        // (2 + 5) / 2 = 3.5 rounds to 4
        assert_eq!(summary.avg_duration_days, 4);
        // (5 + 6 + 6) / 3 = 5.67
        assert_eq!(summary.avg_rounds, 5.7);
        assert_eq!(summary.total_games, 4);
    }

    #[test]
    fn test_duration_counts_started_days() {
        let dataset = crate::models::Dataset::from_json(
            r#"{"games": [{
                "game_id": 1, "game_name": "Weekend", "max_victory_points": 10, "n_players": 0,
                "start_date": "2024-01-01T00:00:00", "end_date": "2024-01-03T12:00:00"
            }]}"#,
        )
        .unwrap();

        // 2.5 days
        assert_eq!(aggregate(&dataset.games, &[]).avg_duration_days, 3);
    }

    #[test]
    fn test_zero_rounds_not_counted() {
        let games = vec![
            four_player_game("1", date("2024-01-01")).with_rounds(0),
            four_player_game("2", date("2024-01-02")).with_rounds(4),
        ];
        assert_eq!(aggregate(&games, &[]).avg_rounds, 4.0);
    }

    #[test]
    fn test_order_independent_and_idempotent() {
        let a = four_player_game("1", date("2024-01-01"));
        let b = game("2", date("2024-01-05"), vec![seat("Eric", "Jol", 10).as_winner(), seat("Manu", "Sol", 9)]);

        let forward = aggregate(&[&a, &b], &[]);
        let again = aggregate(&[&a, &b], &[]);
        let backward = aggregate(&[&b, &a], &[]);

        assert_eq!(forward, again);
        for p in &forward.players {
            let q = backward.player(&p.name).unwrap();
            assert_eq!((p.games, p.wins, p.total_points), (q.games, q.wins, q.total_points));
            assert_eq!(p.win_rate, q.win_rate);
        }
        assert_eq!(forward.factions.len(), backward.factions.len());
    }

    #[test]
    fn test_rates_within_bounds() {
        let games = vec![
            four_player_game("1", date("2024-01-01")),
            game("2", date("2024-01-05"), vec![seat("Manu", "Sol", 3), seat("Eric", "Jol", 10).as_winner()]),
        ];
        let summary = aggregate(&games, &[]);
        for p in &summary.players {
            assert!((0.0..=100.0).contains(&p.win_rate));
            assert!((0.0..=10.0).contains(&p.avg_points));
        }
        assert_eq!(summary.player("Manu").unwrap().win_rate, 50.0);
        assert_eq!(summary.player("Manu").unwrap().avg_points, 6.5);
    }
}
