//! Filter criteria selected in the dashboard.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive bounds on a game's start date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Whether either bound is set.
    pub fn is_set(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Check if a date falls within the bounds.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

/// Filter criteria. Every dimension is empty by default, and an empty
/// dimension does not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Player names; a game matches when any of them took part
    #[serde(default)]
    pub players: BTreeSet<String>,

    /// Faction short codes; a game matches when any of them was picked
    #[serde(default)]
    pub factions: BTreeSet<String>,

    /// Exact seat counts
    #[serde(default)]
    pub player_counts: BTreeSet<u32>,

    /// Exact max victory points
    #[serde(default)]
    pub game_types: BTreeSet<u32>,

    #[serde(default)]
    pub date_range: Option<DateRange>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a player.
    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.players.insert(player.into());
        self
    }

    /// Builder method to add a faction short code.
    pub fn with_faction(mut self, faction: impl Into<String>) -> Self {
        self.factions.insert(faction.into());
        self
    }

    /// Builder method to add a seat count.
    pub fn with_player_count(mut self, count: u32) -> Self {
        self.player_counts.insert(count);
        self
    }

    /// Builder method to add a game type.
    pub fn with_game_type(mut self, max_victory_points: u32) -> Self {
        self.game_types.insert(max_victory_points);
        self
    }

    /// Builder method to set the date range.
    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_range = Some(DateRange::new(start, end));
        self
    }

    /// The selected players as a list, for "personal" statistics.
    pub fn player_subset(&self) -> Vec<String> {
        self.players.iter().cloned().collect()
    }
}
