//! Dataset reader and integrity checks.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};
use crate::models::{Dataset, GameId};

/// Reads the dataset export from disk.
pub struct DatasetReader {
    path: PathBuf,
}

impl DatasetReader {
    /// Create a new reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a reader for the configured dataset file.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.dataset_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and parse the dataset.
    pub fn read(&self) -> Result<Dataset, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let text = fs::read_to_string(&self.path)?;
        let dataset = Dataset::from_json(&text)?;

        info!(
            "Loaded {} games, {} players, {} factions from {:?}",
            dataset.games.len(),
            dataset.players.len(),
            dataset.factions.len(),
            self.path
        );
        Ok(dataset)
    }
}

impl Dataset {
    /// Load a dataset file.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        DatasetReader::new(path.to_path_buf()).read()
    }
}

/// A structural problem in the dataset. The statistics engine does not
/// reject these; they are reported so the export can be fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetIssue {
    DuplicateGameId(GameId),
    MultipleWinners { game: GameId, winners: usize },
    InconsistentFactionName { faction: String, names: Vec<String> },
    OutOfOrder { game: GameId, previous: GameId },
    UnknownPlayer { game: GameId, player: String },
}

impl fmt::Display for DatasetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetIssue::DuplicateGameId(id) => write!(f, "duplicate game id {}", id),
            DatasetIssue::MultipleWinners { game, winners } => {
                write!(f, "game {} has {} winners", game, winners)
            }
            DatasetIssue::InconsistentFactionName { faction, names } => {
                write!(f, "faction {} has several names: {}", faction, names.join(", "))
            }
            DatasetIssue::OutOfOrder { game, previous } => {
                write!(f, "game {} starts before the preceding game {}", game, previous)
            }
            DatasetIssue::UnknownPlayer { game, player } => {
                write!(f, "game {} lists {} who is not in the player list", game, player)
            }
        }
    }
}

/// Report violations of the dataset's structural preconditions.
pub fn check_dataset(dataset: &Dataset) -> Vec<DatasetIssue> {
    let mut issues = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut faction_names: HashMap<&str, Vec<String>> = HashMap::new();
    let known_players: HashSet<&str> = dataset.players.iter().map(|p| p.as_str()).collect();

    for (idx, game) in dataset.games.iter().enumerate() {
        if !seen_ids.insert(game.id.as_str()) {
            issues.push(DatasetIssue::DuplicateGameId(game.id.clone()));
        }

        let winners = game.participants.iter().filter(|p| p.winner).count();
        if winners > 1 {
            issues.push(DatasetIssue::MultipleWinners {
                game: game.id.clone(),
                winners,
            });
        }

        if idx > 0 {
            let previous = &dataset.games[idx - 1];
            if game.start_date() < previous.start_date() {
                issues.push(DatasetIssue::OutOfOrder {
                    game: game.id.clone(),
                    previous: previous.id.clone(),
                });
            }
        }

        for seat in game.participants.iter().filter(|p| p.participated()) {
            if !known_players.is_empty() && !known_players.contains(seat.player_name.as_str()) {
                issues.push(DatasetIssue::UnknownPlayer {
                    game: game.id.clone(),
                    player: seat.player_name.clone(),
                });
            }

            if let (Some(short), Some(full)) = (&seat.faction_short, &seat.faction_full) {
                let names = faction_names.entry(short.as_str()).or_default();
                if !names.contains(full) {
                    names.push(full.clone());
                }
            }
        }
    }

    let mut inconsistent: Vec<_> = faction_names
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .collect();
    inconsistent.sort_by(|a, b| a.0.cmp(b.0));
    issues.extend(
        inconsistent
            .into_iter()
            .map(|(faction, names)| DatasetIssue::InconsistentFactionName {
                faction: faction.to_string(),
                names,
            }),
    );

    for issue in &issues {
        warn!("Dataset issue: {}", issue);
    }
    debug!("Dataset check found {} issues", issues.len());

    issues
}
