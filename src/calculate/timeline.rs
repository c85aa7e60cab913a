//! Cumulative win-rate timelines.

use std::borrow::Borrow;

use super::{iter_games, percentage};
use crate::models::{Game, PlayerTimeline, TimelinePoint};

/// Build a cumulative win-rate series for each tracked player.
///
/// Games are processed in the order given; callers wanting a chronological
/// series must pass the games sorted by start date. `game_number` is the
/// 1-based input position, so a player missing from a game leaves a gap.
/// Every tracked player gets a timeline, possibly empty. Duplicate names are
/// tracked once.
pub fn win_rate_timeline<G: Borrow<Game>>(games: &[G], players: &[String]) -> Vec<PlayerTimeline> {
    let mut timelines: Vec<PlayerTimeline> = Vec::with_capacity(players.len());
    for player in players {
        if !timelines.iter().any(|t| &t.player == player) {
            timelines.push(PlayerTimeline::new(player.clone()));
        }
    }

    for (idx, game) in iter_games(games).enumerate() {
        for seat in game.participants.iter().filter(|p| p.participated()) {
            let Some(timeline) = timelines.iter_mut().find(|t| t.player == seat.player_name) else {
                continue;
            };

            timeline.games += 1;
            if seat.winner {
                timeline.wins += 1;
            }

            timeline.data.push(TimelinePoint {
                game_number: idx as u32 + 1,
                game_id: game.id.clone(),
                game_name: game.name.clone(),
                date: game.start_date(),
                win_rate: percentage(timeline.wins, timeline.games),
                wins: timeline.wins,
                games: timeline.games,
            });
        }
    }

    timelines
}
