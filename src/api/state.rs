use std::sync::Arc;

use crate::calculate::matches;
use crate::config::StatsConfig;
use crate::models::{Dataset, FilterCriteria, Game};

/// Shared state: the dataset is loaded once and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub stats: Arc<StatsConfig>,
}

impl AppState {
    pub fn new(dataset: Dataset, stats: StatsConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            stats: Arc::new(stats),
        }
    }

    /// Games matching the criteria, in chronological order.
    pub fn filtered_games(&self, criteria: &FilterCriteria) -> Vec<&Game> {
        self.dataset
            .chronological()
            .into_iter()
            .filter(|game| matches(game, criteria))
            .collect()
    }
}
