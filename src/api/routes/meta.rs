use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use crate::api::state::AppState;
use crate::models::FactionInfo;

/// Everything the dashboard needs to build its filter panel.
#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub players: Vec<String>,
    pub factions: Vec<FactionInfo>,
    pub player_counts: Vec<u32>,
    pub game_types: Vec<u32>,
    pub total_games: usize,
    pub first_game: Option<NaiveDate>,
    pub last_game: Option<NaiveDate>,
}

pub async fn get_meta(State(state): State<AppState>) -> Json<MetaResponse> {
    let dataset = &state.dataset;
    let span = dataset.date_span();

    Json(MetaResponse {
        players: dataset.players.clone(),
        factions: dataset.factions.clone(),
        player_counts: dataset.player_count_options(),
        game_types: dataset.game_type_options(),
        total_games: dataset.games.len(),
        first_game: span.map(|(first, _)| first),
        last_game: span.map(|(_, last)| last),
    })
}
