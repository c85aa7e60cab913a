//! REST API endpoints.
//!
//! Axum-based HTTP API serving filtered games and the statistics derived
//! from them to the dashboard front-end.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::models::{DateRange, FilterCriteria};
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Filter query parameters shared by the list endpoints.
///
/// Set-valued dimensions are comma-separated, dates are `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub players: Option<String>,
    pub factions: Option<String>,
    pub player_counts: Option<String>,
    pub game_types: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl FilterParams {
    /// Convert into filter criteria, rejecting malformed numbers and dates.
    pub fn criteria(&self) -> Result<FilterCriteria, ApiError> {
        let mut criteria = FilterCriteria::new();

        criteria.players = split_list(self.players.as_deref()).map(String::from).collect();
        criteria.factions = split_list(self.factions.as_deref()).map(String::from).collect();
        criteria.player_counts = parse_numbers(self.player_counts.as_deref(), "player_counts")?;
        criteria.game_types = parse_numbers(self.game_types.as_deref(), "game_types")?;

        let range = DateRange::new(
            parse_date(self.from.as_deref(), "from")?,
            parse_date(self.to.as_deref(), "to")?,
        );
        if range.is_set() {
            criteria.date_range = Some(range);
        }

        Ok(criteria)
    }
}

fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_numbers<T: FromStr + Ord>(
    value: Option<&str>,
    name: &str,
) -> Result<std::collections::BTreeSet<T>, ApiError> {
    split_list(value)
        .map(|s| {
            s.parse()
                .map_err(|_| ApiError::BadRequest(format!("invalid {} value: {}", name, s)))
        })
        .collect()
}

fn parse_date(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>, ApiError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                ApiError::BadRequest(format!("invalid {} date (expected YYYY-MM-DD): {}", name, s))
            }),
    }
}

/// API routes with request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/meta", get(routes::meta::get_meta))
        .route("/api/games", get(routes::games::list_games))
        .route("/api/games/:id", get(routes::games::get_game))
        .route("/api/stats", get(routes::stats::get_stats))
        .route("/api/factions", get(routes::stats::faction_stats))
        .route("/api/positions", get(routes::stats::position_stats))
        .route("/api/rounds", get(routes::stats::round_stats))
        .route("/api/timeline", get(routes::timeline::get_timeline))
        .route("/api/participation", get(routes::timeline::get_participation))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Full application: API routes, CORS and, when configured, the
/// dashboard's static files.
pub fn build_app(state: AppState, server: &ServerConfig) -> Router {
    let mut app = build_router(state).layer(cors_layer(&server.cors_origin));

    if let Some(dir) = &server.static_dir {
        info!("Serving static files from {:?}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, allowing any origin", origin);
            layer.allow_origin(Any)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(f: impl FnOnce(&mut FilterParams)) -> FilterParams {
        let mut p = FilterParams::default();
        f(&mut p);
        p
    }

    #[test]
    fn test_empty_params() {
        let criteria = FilterParams::default().criteria().unwrap();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_comma_separated_lists() {
        let criteria = params(|p| {
            p.players = Some("Manu, Eric,,".to_string());
            p.player_counts = Some("4,6".to_string());
            p.game_types = Some("14".to_string());
        })
        .criteria()
        .unwrap();

        assert_eq!(criteria.players.len(), 2);
        assert!(criteria.players.contains("Eric"));
        assert!(criteria.player_counts.contains(&6));
        assert!(criteria.game_types.contains(&14));
        assert!(criteria.date_range.is_none());
    }

    #[test]
    fn test_date_bounds() {
        let criteria = params(|p| p.from = Some("2024-03-01".to_string()))
            .criteria()
            .unwrap();
        let range = criteria.date_range.unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(range.end.is_none());
    }

    #[test]
    fn test_malformed_values() {
        let bad_count = params(|p| p.player_counts = Some("4,six".to_string())).criteria();
        assert!(matches!(bad_count, Err(ApiError::BadRequest(_))));

        let bad_date = params(|p| p.to = Some("01/03/2024".to_string())).criteria();
        assert!(matches!(bad_date, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_error_response_status() {
        let resp = ApiError::NotFound("game 9".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
