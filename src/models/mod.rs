//! Core data models: games, the dataset, filter criteria and derived statistics.

mod dataset;
mod filter;
mod game;
mod ids;
mod stats;

pub use dataset::*;
pub use filter::*;
pub use game::*;
pub use ids::*;
pub use stats::*;
