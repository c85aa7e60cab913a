//! The static dataset the dashboard is built from.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::Game;

/// A faction known to the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionInfo {
    /// Short code (e.g., "Hacan")
    pub short: String,

    /// Full name (e.g., "The Emirates of Hacan")
    #[serde(default)]
    pub full: Option<String>,

    /// Path to the faction icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Games, players and factions as produced by the data export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub games: Vec<Game>,

    #[serde(default)]
    pub players: Vec<String>,

    #[serde(default)]
    pub factions: Vec<FactionInfo>,
}

/// Wire shape before games are checked one by one.
#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    games: Vec<Value>,

    #[serde(default)]
    players: Vec<String>,

    #[serde(default)]
    factions: Vec<FactionInfo>,
}

impl Dataset {
    /// Parse a dataset from its JSON text.
    ///
    /// Games exported without a start date are skipped with a warning. Any
    /// other malformed game fails the whole parse, naming the game.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let raw: RawDataset = serde_json::from_str(text)?;

        let mut games = Vec::with_capacity(raw.games.len());
        for value in raw.games {
            let id = match value.get("game_id") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "without id".to_string(),
            };

            if value.get("start_date").map_or(true, Value::is_null) {
                warn!("Skipping game {}: no start date", id);
                continue;
            }

            let game = serde_json::from_value(value)
                .map_err(|e| serde_json::Error::custom(format!("game {}: {}", id, e)))?;
            games.push(game);
        }

        Ok(Self {
            games,
            players: raw.players,
            factions: raw.factions,
        })
    }

    /// Games ordered by start date. Games sharing a date keep their
    /// original relative order.
    pub fn chronological(&self) -> Vec<&Game> {
        let mut games: Vec<_> = self.games.iter().collect();
        games.sort_by_key(|g| g.start_date());
        games
    }

    /// Find a game by id.
    pub fn game(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id.as_str() == id)
    }

    /// Look up a faction by short code.
    pub fn faction(&self, short: &str) -> Option<&FactionInfo> {
        self.factions.iter().find(|f| f.short == short)
    }

    /// Distinct seat counts present in the games, ascending.
    pub fn player_count_options(&self) -> Vec<u32> {
        let mut counts: Vec<u32> = self.games.iter().map(|g| g.player_count).collect();
        counts.sort_unstable();
        counts.dedup();
        counts
    }

    /// Distinct game types (max victory points) present, ascending.
    pub fn game_type_options(&self) -> Vec<u32> {
        let mut types: Vec<u32> = self.games.iter().map(|g| g.max_victory_points).collect();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// First and last start date across all games.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.games.iter().map(|g| g.start_date()).min()?;
        let last = self.games.iter().map(|g| g.start_date()).max()?;
        Some((first, last))
    }
}
