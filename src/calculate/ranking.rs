//! Faction and player selection helpers.
//!
//! Ties always go to the entry encountered first while aggregating, i.e.
//! the order of `StatsSummary::factions` / `StatsSummary::players`.

use std::cmp::Ordering;

use crate::models::{FactionStat, PlayerStat};

/// Faction with the highest win rate among those with at least
/// `min_games` games.
pub fn best_faction(factions: &[FactionStat], min_games: u32) -> Option<&FactionStat> {
    factions
        .iter()
        .filter(|f| f.games >= min_games)
        .fold(None, |best: Option<&FactionStat>, f| match best {
            Some(b) if f.win_rate <= b.win_rate => Some(b),
            _ => Some(f),
        })
}

/// Faction with the most games.
pub fn most_played_faction(factions: &[FactionStat]) -> Option<&FactionStat> {
    factions
        .iter()
        .fold(None, |best: Option<&FactionStat>, f| match best {
            Some(b) if f.games <= b.games => Some(b),
            _ => Some(f),
        })
}

/// Factions with at least `min_games` games, best win rate first.
pub fn faction_leaderboard(factions: &[FactionStat], min_games: u32) -> Vec<&FactionStat> {
    let mut board: Vec<_> = factions.iter().filter(|f| f.games >= min_games).collect();
    board.sort_by(|a, b| by_win_rate_desc(a.win_rate, b.win_rate));
    board
}

/// Players, best win rate first.
pub fn player_leaderboard(players: &[PlayerStat]) -> Vec<&PlayerStat> {
    let mut board: Vec<_> = players.iter().collect();
    board.sort_by(|a, b| by_win_rate_desc(a.win_rate, b.win_rate));
    board
}

fn by_win_rate_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faction(short: &str, games: u32, wins: u32) -> FactionStat {
        FactionStat::new(short.to_string(), None, games, wins)
    }

    #[test]
    fn test_best_faction_respects_min_games() {
        let factions = vec![faction("Sol", 2, 2), faction("Hacan", 3, 1)];

        // Sol has 2 games: one short of the threshold.
        assert_eq!(best_faction(&factions, 3).map(|f| f.short_name.as_str()), Some("Hacan"));
        // At exactly the threshold it is included.
        assert_eq!(best_faction(&factions, 2).map(|f| f.short_name.as_str()), Some("Sol"));
        assert!(best_faction(&factions, 4).is_none());
    }

    #[test]
    fn test_best_faction_tie_goes_to_first() {
        let factions = vec![faction("Jol", 4, 2), faction("Sol", 2, 1), faction("Yin", 6, 3)];
        assert_eq!(best_faction(&factions, 1).map(|f| f.short_name.as_str()), Some("Jol"));
    }

    #[test]
    fn test_best_faction_all_zero_rates() {
        let factions = vec![faction("Jol", 3, 0), faction("Sol", 3, 0)];
        assert_eq!(best_faction(&factions, 3).map(|f| f.short_name.as_str()), Some("Jol"));
    }

    #[test]
    fn test_most_played_faction() {
        let factions = vec![faction("Jol", 2, 0), faction("Sol", 5, 1), faction("Yin", 5, 4)];
        assert_eq!(most_played_faction(&factions).map(|f| f.short_name.as_str()), Some("Sol"));
        assert!(most_played_faction(&[]).is_none());
    }

    #[test]
    fn test_faction_leaderboard_stable() {
        let factions = vec![
            faction("Jol", 2, 1),
            faction("Sol", 1, 1),
            faction("Yin", 4, 2),
            faction("Hacan", 2, 2),
        ];

        let names: Vec<_> = faction_leaderboard(&factions, 2)
            .iter()
            .map(|f| f.short_name.as_str())
            .collect();
        assert_eq!(names, vec!["Hacan", "Jol", "Yin"]);
    }

    #[test]
    fn test_player_leaderboard() {
        let players = vec![
            PlayerStat::new("Eric".to_string(), 4, 1, 20),
            PlayerStat::new("Manu".to_string(), 2, 2, 20),
            PlayerStat::new("Frank".to_string(), 0, 0, 0),
        ];

        let names: Vec<_> = player_leaderboard(&players).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Manu", "Eric", "Frank"]);
    }
}
