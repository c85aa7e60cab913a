use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::{ApiError, FilterParams};
use crate::calculate::{
    active_filter_count, aggregate, best_faction, faction_leaderboard, most_played_faction,
    player_leaderboard, position_stats as positional_report, round_distribution,
};
use crate::models::{FactionStat, PlayerStat, PositionStat, RoundBucket, StatsSummary};

#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    /// Restrict aggregation to the filtered players
    pub personal: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub summary: StatsSummary,
    pub leaderboard: Vec<PlayerStat>,
    pub best_faction: Option<FactionStat>,
    pub most_played_faction: Option<FactionStat>,
    pub active_filters: usize,
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(filter): Query<FilterParams>,
    Query(params): Query<StatsParams>,
) -> Result<Json<StatsResponse>, ApiError> {
    let criteria = filter.criteria()?;
    let games = state.filtered_games(&criteria);

    let subset = if params.personal.unwrap_or(false) {
        criteria.player_subset()
    } else {
        Vec::new()
    };
    debug!("Aggregating {} games for {} players", games.len(), subset.len());

    let summary = aggregate(&games, &subset);
    let leaderboard = player_leaderboard(&summary.players)
        .into_iter()
        .cloned()
        .collect();
    let best = best_faction(&summary.factions, state.stats.best_faction_min_games).cloned();
    let most_played = most_played_faction(&summary.factions).cloned();

    Ok(Json(StatsResponse {
        leaderboard,
        best_faction: best,
        most_played_faction: most_played,
        active_filters: active_filter_count(&criteria),
        summary,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct FactionParams {
    pub min_games: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct FactionsResponse {
    pub factions: Vec<FactionStat>,
    pub min_games: u32,
}

/// Faction leaderboard, always restricted to the filtered players.
pub async fn faction_stats(
    State(state): State<AppState>,
    Query(filter): Query<FilterParams>,
    Query(params): Query<FactionParams>,
) -> Result<Json<FactionsResponse>, ApiError> {
    let criteria = filter.criteria()?;
    let games = state.filtered_games(&criteria);
    let summary = aggregate(&games, &criteria.player_subset());

    let min_games = params
        .min_games
        .unwrap_or(state.stats.faction_chart_min_games);
    let factions = faction_leaderboard(&summary.factions, min_games)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(FactionsResponse {
        factions,
        min_games,
    }))
}

#[derive(Debug, Serialize)]
pub struct PositionsResponse {
    pub per_position: Vec<PositionStat>,
    pub overall_expected_rate: f64,
    pub total_entries: u32,
    pub best_position: Option<PositionStat>,
    pub worst_position: Option<PositionStat>,
}

pub async fn position_stats(
    State(state): State<AppState>,
    Query(filter): Query<FilterParams>,
) -> Result<Json<PositionsResponse>, ApiError> {
    let criteria = filter.criteria()?;
    let report = positional_report(&state.filtered_games(&criteria));

    Ok(Json(PositionsResponse {
        total_entries: report.total_entries(),
        best_position: report.best_position().cloned(),
        worst_position: report.worst_position().cloned(),
        overall_expected_rate: report.overall_expected_rate,
        per_position: report.per_position,
    }))
}

#[derive(Debug, Serialize)]
pub struct RoundsResponse {
    pub rounds: Vec<RoundBucket>,
}

pub async fn round_stats(
    State(state): State<AppState>,
    Query(filter): Query<FilterParams>,
) -> Result<Json<RoundsResponse>, ApiError> {
    let criteria = filter.criteria()?;
    let rounds = round_distribution(&state.filtered_games(&criteria));
    Ok(Json(RoundsResponse { rounds }))
}
