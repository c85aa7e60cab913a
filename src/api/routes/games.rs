use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{ApiError, FilterParams};
use crate::calculate::active_filter_count;
use crate::models::{Dataset, Game, GameId, Participation};

/// One row of the games table.
#[derive(Debug, Serialize)]
pub struct GameSummary {
    pub id: GameId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i64>,
    pub rounds: Option<u32>,
    pub player_count: u32,
    pub max_victory_points: u32,
    pub winner: Option<String>,
    pub winner_faction: Option<String>,
}

impl From<&Game> for GameSummary {
    fn from(game: &Game) -> Self {
        let winner = game.winner().filter(|w| w.participated());
        Self {
            id: game.id.clone(),
            name: game.name.clone(),
            start_date: game.start_date(),
            end_date: game.end_date(),
            duration_days: game.duration_days(),
            rounds: game.rounds,
            player_count: game.player_count,
            max_victory_points: game.max_victory_points,
            winner: winner.map(|w| w.player_name.clone()),
            winner_faction: winner.and_then(|w| w.faction_short.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameListResponse {
    pub games: Vec<GameSummary>,
    pub total: usize,
    pub active_filters: usize,
}

pub async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<GameListResponse>, ApiError> {
    let criteria = params.criteria()?;
    let games: Vec<GameSummary> = state
        .filtered_games(&criteria)
        .into_iter()
        .map(GameSummary::from)
        .collect();

    Ok(Json(GameListResponse {
        total: games.len(),
        games,
        active_filters: active_filter_count(&criteria),
    }))
}

/// A seat in the game detail view.
#[derive(Debug, Serialize)]
pub struct ParticipantDetail {
    pub player_name: String,
    pub faction_short: Option<String>,
    pub faction_full: Option<String>,
    pub faction_icon: Option<String>,
    pub victory_points: Option<u32>,
    pub winner: bool,
    pub starting_position: Option<u32>,
}

impl ParticipantDetail {
    fn new(seat: &Participation, dataset: &Dataset) -> Self {
        let faction = seat.faction_short.as_deref().and_then(|s| dataset.faction(s));
        Self {
            player_name: seat.player_name.clone(),
            faction_short: seat.faction_short.clone(),
            faction_full: seat
                .faction_full
                .clone()
                .or_else(|| faction.and_then(|f| f.full.clone())),
            faction_icon: faction.and_then(|f| f.icon.clone()),
            victory_points: seat.victory_points,
            winner: seat.winner,
            starting_position: seat.starting_position,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameDetailResponse {
    #[serde(flatten)]
    pub game: GameSummary,

    /// Seats with a recorded result, highest score first
    pub participants: Vec<ParticipantDetail>,
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameDetailResponse>, ApiError> {
    let game = state
        .dataset
        .game(&id)
        .ok_or_else(|| ApiError::NotFound(format!("game {}", id)))?;

    let participants = game
        .participants()
        .into_iter()
        .map(|seat| ParticipantDetail::new(seat, &state.dataset))
        .collect();

    Ok(Json(GameDetailResponse {
        game: GameSummary::from(game),
        participants,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::routes::test_support::{get_json, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_list_games_chronological() {
        let (status, json) = get_json(test_app(), "/api/games").await;
        assert_eq!(status, StatusCode::OK);

        let ids: Vec<_> = json["games"]
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
        assert_eq!(json["total"], 3);
        assert_eq!(json["active_filters"], 0);
    }

    #[tokio::test]
    async fn test_list_games_filtered() {
        let (status, json) = get_json(
            test_app(),
            "/api/games?players=Frank&game_types=10&from=2024-02-01",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 1);
        assert_eq!(json["games"][0]["id"], "1");
        assert_eq!(json["games"][0]["winner"], "Eric");
        assert_eq!(json["active_filters"], 3);
    }

    #[tokio::test]
    async fn test_absent_player_does_not_match() {
        // Eric has a seat in game 3 but no recorded result.
        let (_, json) = get_json(test_app(), "/api/games?players=Eric").await;
        assert_eq!(json["total"], 2);
    }

    #[tokio::test]
    async fn test_list_games_bad_filter() {
        let (status, json) = get_json(test_app(), "/api/games?player_counts=four").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_get_game() {
        let (status, json) = get_json(test_app(), "/api/games/3").await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(json["name"], "Long Game");
        assert_eq!(json["duration_days"], 2);
        assert_eq!(json["winner"], "Manu");
        assert_eq!(json["winner_faction"], "Sol");

        let seats = json["participants"].as_array().unwrap();
        assert_eq!(seats.len(), 3);
        assert_eq!(seats[0]["player_name"], "Manu");
        assert_eq!(seats[2]["victory_points"], 9);
        assert_eq!(seats[1]["faction_icon"], "hacan.png");
    }

    #[tokio::test]
    async fn test_get_game_not_found() {
        let (status, json) = get_json(test_app(), "/api/games/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }
}
