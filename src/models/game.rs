//! Played games and per-seat results.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::GameId;

/// One player's result within a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participation {
    pub player_name: String,

    /// Faction short code, the aggregation key for faction statistics
    #[serde(default)]
    pub faction_short: Option<String>,

    /// Display name of the faction
    #[serde(default)]
    pub faction_full: Option<String>,

    /// `None` means the player did not take part in this game
    #[serde(default)]
    pub victory_points: Option<u32>,

    #[serde(default)]
    pub winner: bool,

    /// Seat order index
    #[serde(default)]
    pub starting_position: Option<u32>,
}

impl Participation {
    /// Create a seat for a player with no recorded result.
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            faction_short: None,
            faction_full: None,
            victory_points: None,
            winner: false,
            starting_position: None,
        }
    }

    /// Builder method to set victory points.
    pub fn with_points(mut self, points: u32) -> Self {
        self.victory_points = Some(points);
        self
    }

    /// Builder method to set the faction.
    pub fn with_faction(mut self, short: impl Into<String>, full: impl Into<String>) -> Self {
        self.faction_short = Some(short.into());
        self.faction_full = Some(full.into());
        self
    }

    /// Builder method to set the starting position.
    pub fn at_position(mut self, position: u32) -> Self {
        self.starting_position = Some(position);
        self
    }

    /// Builder method to mark the winner.
    pub fn as_winner(mut self) -> Self {
        self.winner = true;
        self
    }

    /// Whether this seat counts towards statistics.
    pub fn participated(&self) -> bool {
        self.victory_points.is_some()
    }
}

/// One played session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "game_id")]
    pub id: GameId,

    #[serde(rename = "game_name")]
    pub name: String,

    /// Start, with the time of day when the export has one
    #[serde(rename = "start_date", with = "flexible_date")]
    pub started_at: NaiveDateTime,

    #[serde(rename = "end_date", default, with = "flexible_date::option")]
    pub ended_at: Option<NaiveDateTime>,

    /// Number of seats, including players without a recorded result
    #[serde(rename = "n_players")]
    pub player_count: u32,

    /// Points needed to win, which also identifies the game variant
    pub max_victory_points: u32,

    #[serde(default)]
    pub rounds: Option<u32>,

    #[serde(rename = "players", default)]
    pub participants: Vec<Participation>,
}

impl Game {
    /// Create a new game with no seats.
    pub fn new(
        id: impl Into<GameId>,
        name: impl Into<String>,
        start_date: NaiveDate,
        max_victory_points: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            started_at: start_date.and_time(NaiveTime::MIN),
            ended_at: None,
            player_count: 0,
            max_victory_points,
            rounds: None,
            participants: Vec::new(),
        }
    }

    /// Builder method to add a seat. Keeps `player_count` equal to the
    /// number of seats.
    pub fn with_participant(mut self, participant: Participation) -> Self {
        self.participants.push(participant);
        self.player_count = self.participants.len() as u32;
        self
    }

    /// Builder method to set the end date.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.ended_at = Some(end_date.and_time(NaiveTime::MIN));
        self
    }

    /// Builder method to set the start and end with a time of day.
    pub fn with_times(mut self, started_at: NaiveDateTime, ended_at: NaiveDateTime) -> Self {
        self.started_at = started_at;
        self.ended_at = Some(ended_at);
        self
    }

    /// Builder method to set the number of rounds.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = Some(rounds);
        self
    }

    /// Calendar date the game started on.
    pub fn start_date(&self) -> NaiveDate {
        self.started_at.date()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.ended_at.map(|end| end.date())
    }

    /// Days between start and end, a started day counting as a whole one.
    pub fn duration_days(&self) -> Option<i64> {
        const SECONDS_PER_DAY: i64 = 86_400;

        self.ended_at.map(|end| {
            let seconds = (end - self.started_at).num_seconds();
            let days = seconds.div_euclid(SECONDS_PER_DAY);
            if seconds.rem_euclid(SECONDS_PER_DAY) > 0 {
                days + 1
            } else {
                days
            }
        })
    }

    /// The declared winner, if any.
    pub fn winner(&self) -> Option<&Participation> {
        self.participants.iter().find(|p| p.winner)
    }

    /// Seats with a recorded result, highest score first.
    pub fn participants(&self) -> Vec<&Participation> {
        let mut seats: Vec<_> = self.participants.iter().filter(|p| p.participated()).collect();
        seats.sort_by(|a, b| b.victory_points.cmp(&a.victory_points));
        seats
    }

    /// Whether `player` has a recorded result in this game.
    pub fn has_player(&self, player: &str) -> bool {
        self.participants
            .iter()
            .any(|p| p.participated() && p.player_name == player)
    }
}

/// Date fields written either as `YYYY-MM-DD` or as an ISO date-time.
/// A plain date is taken as midnight.
pub mod flexible_date {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const DATE_FORMAT: &str = "%Y-%m-%d";
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
            return Some(date.and_time(NaiveTime::MIN));
        }
        DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .or_else(|| {
                // Trailing zone suffixes and the like: keep the date only.
                s.get(..10)
                    .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
    }

    pub fn format(value: &NaiveDateTime) -> String {
        if value.time() == NaiveTime::MIN {
            value.format(DATE_FORMAT).to_string()
        } else {
            value.format("%Y-%m-%dT%H:%M:%S").to_string()
        }
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| D::Error::custom(format!("invalid date: {}", s)))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(s) => parse(&s)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid date: {}", s))),
                None => Ok(None),
            }
        }
    }
}
