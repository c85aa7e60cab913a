//! Game filter predicates.

use std::borrow::Borrow;

use super::iter_games;
use crate::models::{FilterCriteria, Game};

/// Whether a game passes every non-empty dimension of the criteria.
///
/// Dimensions combine with AND; entries within a dimension combine with OR.
pub fn matches(game: &Game, criteria: &FilterCriteria) -> bool {
    if !criteria.players.is_empty()
        && !game
            .participants
            .iter()
            .any(|p| p.participated() && criteria.players.contains(&p.player_name))
    {
        return false;
    }

    // Any seat counts here, with or without a recorded result.
    if !criteria.factions.is_empty()
        && !game.participants.iter().any(|p| {
            p.faction_short
                .as_ref()
                .is_some_and(|f| criteria.factions.contains(f))
        })
    {
        return false;
    }

    if !criteria.player_counts.is_empty() && !criteria.player_counts.contains(&game.player_count) {
        return false;
    }

    if !criteria.game_types.is_empty() && !criteria.game_types.contains(&game.max_victory_points)
    {
        return false;
    }

    if let Some(range) = &criteria.date_range {
        if !range.contains(game.start_date()) {
            return false;
        }
    }

    true
}

/// Games matching the criteria, in input order.
pub fn filter_games<'a, G: Borrow<Game>>(games: &'a [G], criteria: &FilterCriteria) -> Vec<&'a Game> {
    iter_games(games).filter(|g| matches(g, criteria)).collect()
}

/// Number of dimensions currently filtering.
pub fn active_filter_count(criteria: &FilterCriteria) -> usize {
    [
        !criteria.players.is_empty(),
        !criteria.factions.is_empty(),
        !criteria.player_counts.is_empty(),
        !criteria.game_types.is_empty(),
        criteria.date_range.is_some_and(|r| r.is_set()),
    ]
    .into_iter()
    .filter(|active| *active)
    .count()
}
