//! Dataset file access.
//!
//! The dashboard reads one static JSON export (games, players, factions)
//! from the data directory. Producing that export is out of scope.

mod dataset;

pub use dataset::*;

use std::path::PathBuf;
use thiserror::Error;

/// Default file name of the dataset export.
pub const DEFAULT_DATASET_FILE: &str = "ti_data.json";

/// Errors that can occur while loading the dataset.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub dataset_file: String,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            dataset_file: DEFAULT_DATASET_FILE.to_string(),
        }
    }

    /// Builder method to use a different dataset file name.
    pub fn with_dataset_file(mut self, file: impl Into<String>) -> Self {
        self.dataset_file = file.into();
        self
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join(&self.dataset_file)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
