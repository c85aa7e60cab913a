//! Derived statistics models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Game, GameId};
use crate::calculate::{percentage, ratio};

/// Per-player statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStat {
    /// Player name
    pub name: String,

    /// Games with a recorded result
    pub games: u32,

    /// Games won
    pub wins: u32,

    /// Sum of victory points over all games
    pub total_points: u32,

    /// Win rate (0 to 100)
    pub win_rate: f64,

    /// Average victory points per game
    pub avg_points: f64,
}

impl PlayerStat {
    /// Create a new PlayerStat with calculated fields.
    pub fn new(name: String, games: u32, wins: u32, total_points: u32) -> Self {
        Self {
            name,
            games,
            wins,
            total_points,
            win_rate: percentage(wins, games),
            avg_points: ratio(total_points, games),
        }
    }
}

/// Per-faction statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionStat {
    /// Faction short code
    pub short_name: String,

    /// Display name, taken from the first game the faction appeared in
    pub full_name: Option<String>,

    pub games: u32,
    pub wins: u32,

    /// Win rate (0 to 100)
    pub win_rate: f64,
}

impl FactionStat {
    /// Create a new FactionStat with calculated fields.
    pub fn new(short_name: String, full_name: Option<String>, games: u32, wins: u32) -> Self {
        Self {
            short_name,
            full_name,
            games,
            wins,
            win_rate: percentage(wins, games),
        }
    }
}

/// Global summary over a set of games.
///
/// `players` and `factions` are kept in first-encountered order, which
/// the ranking helpers rely on for tie-breaks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub players: Vec<PlayerStat>,
    pub factions: Vec<FactionStat>,
    pub total_games: u32,

    /// Average game length in whole days (games with both dates only)
    pub avg_duration_days: i64,

    /// Average number of rounds, one decimal
    pub avg_rounds: f64,
}

impl StatsSummary {
    /// Get a player's statistics by name.
    pub fn player(&self, name: &str) -> Option<&PlayerStat> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Get a faction's statistics by short code.
    pub fn faction(&self, short_name: &str) -> Option<&FactionStat> {
        self.factions.iter().find(|f| f.short_name == short_name)
    }
}

/// A cumulative win-rate snapshot taken after one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// 1-based position of the game in the input order
    pub game_number: u32,
    pub game_id: GameId,
    pub game_name: String,
    pub date: NaiveDate,
    pub win_rate: f64,
    pub wins: u32,
    pub games: u32,
}

/// Win-rate series of one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTimeline {
    pub player: String,
    pub games: u32,
    pub wins: u32,
    pub data: Vec<TimelinePoint>,
}

impl PlayerTimeline {
    pub fn new(player: String) -> Self {
        Self {
            player,
            games: 0,
            wins: 0,
            data: Vec::new(),
        }
    }
}

/// Reference to a game inside a participation period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRef {
    pub id: GameId,
    pub name: String,
    pub date: NaiveDate,
}

impl From<&Game> for GameRef {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id.clone(),
            name: game.name.clone(),
            date: game.start_date(),
        }
    }
}

/// A stretch of time during which a player played regularly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationPeriod {
    pub start: NaiveDate,

    /// Date of the last game in the period
    pub end: NaiveDate,

    pub games: Vec<GameRef>,
}

impl ParticipationPeriod {
    /// Open a period with its first game.
    pub fn starting_with(game: &Game) -> Self {
        Self {
            start: game.start_date(),
            end: game.start_date(),
            games: vec![GameRef::from(game)],
        }
    }

    /// Extend the period with a later game.
    pub fn extend_with(&mut self, game: &Game) {
        self.end = game.start_date();
        self.games.push(GameRef::from(game));
    }
}

/// First and last start date of a set of games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub total_days: i64,
}

/// Participation periods of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerActivity {
    pub player: String,
    pub total_games: usize,
    pub periods: Vec<ParticipationPeriod>,
}

/// When each player was active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityOverview {
    pub span: Option<DateSpan>,

    /// Players with at least one period, in the requested order
    pub players: Vec<PlayerActivity>,
}

/// Win rate of one starting position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionStat {
    pub position: u32,

    /// Observed win rate (0 to 100, one decimal)
    pub win_rate: f64,

    /// Win rate expected if seat order had no effect (one decimal)
    pub expected_rate: f64,

    pub wins: u32,
    pub total: u32,
}

/// Win rates by starting position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    /// Sorted by position ascending
    pub per_position: Vec<PositionStat>,

    /// Appearance-weighted average of the expected rates
    pub overall_expected_rate: f64,
}

impl PositionReport {
    /// Total eligible seat entries.
    pub fn total_entries(&self) -> u32 {
        self.per_position.iter().map(|p| p.total).sum()
    }

    /// Position with the highest win rate; the lowest position wins ties.
    pub fn best_position(&self) -> Option<&PositionStat> {
        let mut iter = self.per_position.iter();
        let first = iter.next()?;
        Some(iter.fold(first, |best, p| if p.win_rate > best.win_rate { p } else { best }))
    }

    /// Position with the lowest win rate; the lowest position wins ties.
    pub fn worst_position(&self) -> Option<&PositionStat> {
        let mut iter = self.per_position.iter();
        let first = iter.next()?;
        Some(iter.fold(first, |worst, p| if p.win_rate < worst.win_rate { p } else { worst }))
    }
}

/// Share of games that lasted a given number of rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundBucket {
    pub round: u32,
    pub count: u32,

    /// Percentage of games with a recorded round count (one decimal)
    pub percentage: f64,
}
