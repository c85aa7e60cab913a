//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculate::DEFAULT_PERIOD_GAP_DAYS;
use crate::storage::{StorageConfig, DEFAULT_DATASET_FILE};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Directory with the dashboard front-end, served at `/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            static_dir: None,
        }
    }
}

/// Thresholds used when deriving statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Minimum games for a faction to be named best faction
    #[serde(default = "default_best_faction_min_games")]
    pub best_faction_min_games: u32,

    /// Minimum games for a faction to appear on the leaderboard
    #[serde(default = "default_faction_chart_min_games")]
    pub faction_chart_min_games: u32,

    /// Longest break (in days) that still continues a participation period
    #[serde(default = "default_period_gap_days")]
    pub period_gap_days: i64,
}

fn default_best_faction_min_games() -> u32 {
    3
}

fn default_faction_chart_min_games() -> u32 {
    2
}

fn default_period_gap_days() -> i64 {
    DEFAULT_PERIOD_GAP_DAYS
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            best_faction_min_games: default_best_faction_min_games(),
            faction_chart_min_games: default_faction_chart_min_games(),
            period_gap_days: default_period_gap_days(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_dataset_file")]
    pub dataset_file: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub stats: StatsConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_dataset_file() -> String {
    DEFAULT_DATASET_FILE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            dataset_file: default_dataset_file(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
            stats: StatsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.dataset_file.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Dataset file name must not be empty".to_string(),
            ));
        }

        if self.stats.period_gap_days <= 0 {
            return Err(ConfigError::ValidationError(
                "Period gap must be at least one day".to_string(),
            ));
        }

        Ok(())
    }

    pub fn storage(&self) -> StorageConfig {
        StorageConfig::new(self.data_dir.clone()).with_dataset_file(self.dataset_file.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.dataset_file, "ti_data.json");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.static_dir.is_none());
    }

    #[test]
    fn test_stats_config_default() {
        let stats = StatsConfig::default();

        assert_eq!(stats.best_faction_min_games, 3);
        assert_eq!(stats.faction_chart_min_games, 2);
        assert_eq!(stats.period_gap_days, 60);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_dataset_file() {
        let mut config = AppConfig::default();
        config.dataset_file = "  ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_gap() {
        let mut config = AppConfig::default();
        config.stats.period_gap_days = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/ti\"\n\n[stats]\nbest_faction_min_games = 5\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/ti"));
        assert_eq!(config.stats.best_faction_min_games, 5);
        assert_eq!(config.stats.period_gap_days, 60);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.storage().dataset_path(),
            PathBuf::from("/srv/ti/ti_data.json")
        );
    }

    #[test]
    fn test_invalid_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_or_default(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.stats.period_gap_days, parsed.stats.period_gap_days);
    }
}
