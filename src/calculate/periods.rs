//! Participation periods: when each player was active.

use std::borrow::Borrow;

use super::iter_games;
use crate::models::{ActivityOverview, DateSpan, Game, ParticipationPeriod, PlayerActivity};

/// Largest gap, in days, between two games of the same period.
pub const DEFAULT_PERIOD_GAP_DAYS: i64 = 60;

/// Group a player's games into contiguous active periods.
///
/// Games are taken in input order (chronological order is the caller's
/// responsibility). A game joins the current period when it starts at most
/// `gap_days` after the period's end date; otherwise the period is closed
/// and a new one opens. Only games where the player has a recorded result
/// count.
pub fn participation_periods<G: Borrow<Game>>(
    games: &[G],
    player: &str,
    gap_days: i64,
) -> Vec<ParticipationPeriod> {
    let mut periods = Vec::new();
    let mut current: Option<ParticipationPeriod> = None;

    for game in iter_games(games).filter(|g| g.has_player(player)) {
        match current.as_mut() {
            Some(period) if (game.start_date() - period.end).num_days() <= gap_days => {
                period.extend_with(game);
            }
            _ => {
                if let Some(done) = current.replace(ParticipationPeriod::starting_with(game)) {
                    periods.push(done);
                }
            }
        }
    }

    periods.extend(current);
    periods
}

/// Participation periods for several players plus the overall date span.
///
/// Players without any period are left out.
pub fn activity_overview<G: Borrow<Game>>(
    games: &[G],
    players: &[String],
    gap_days: i64,
) -> ActivityOverview {
    let dates = iter_games(games).map(|g| g.start_date());
    let span = dates.clone().min().zip(dates.max()).map(|(first, last)| DateSpan {
        first,
        last,
        total_days: (last - first).num_days(),
    });

    let players = players
        .iter()
        .map(|player| {
            let periods = participation_periods(games, player, gap_days);
            PlayerActivity {
                player: player.clone(),
                total_games: periods.iter().map(|p| p.games.len()).sum(),
                periods,
            }
        })
        .filter(|activity| !activity.periods.is_empty())
        .collect();

    ActivityOverview { span, players }
}
