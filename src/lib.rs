//! # TI Stats
//!
//! Statistics for a board-game group's recorded Twilight Imperium games.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (games, participations, filter criteria, derived stats)
//! - **calculate**: Filtering, aggregation, timelines, participation periods and positional analysis
//! - **storage**: Loading and checking the dataset export
//! - **api**: REST API endpoints for the dashboard
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
