use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{ApiError, FilterParams};
use crate::calculate::{activity_overview, win_rate_timeline};
use crate::models::{ActivityOverview, PlayerTimeline};

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub timelines: Vec<PlayerTimeline>,
    pub total_games: usize,
}

/// Win-rate progression of every player over the filtered games, oldest
/// game first.
pub async fn get_timeline(
    State(state): State<AppState>,
    Query(filter): Query<FilterParams>,
) -> Result<Json<TimelineResponse>, ApiError> {
    let criteria = filter.criteria()?;
    let games = state.filtered_games(&criteria);
    let timelines = win_rate_timeline(&games, &state.dataset.players);

    Ok(Json(TimelineResponse {
        timelines,
        total_games: games.len(),
    }))
}

pub async fn get_participation(
    State(state): State<AppState>,
    Query(filter): Query<FilterParams>,
) -> Result<Json<ActivityOverview>, ApiError> {
    let criteria = filter.criteria()?;
    let games = state.filtered_games(&criteria);

    Ok(Json(activity_overview(
        &games,
        &state.dataset.players,
        state.stats.period_gap_days,
    )))
}
