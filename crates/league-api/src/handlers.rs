//! REST endpoint handlers.
//!
//! Handlers parse identifiers from the path or query string, delegate to
//! the [`StatsEngine`](league_stats::StatsEngine) in [`AppState`] and
//! return its result as JSON.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness probe |
//! | `GET` | `/players/stats` | League statistics table |
//! | `GET` | `/players/{id}` | Player detail bundle |
//! | `GET` | `/teams/{id}` | Team detail bundle |
//! | `GET` | `/match-ratings?match_id=` | Rating averages for one match |
//! | `POST` | `/match-ratings` | Submit a peer rating |

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use league_stats::StatsError;
use league_types::{MatchId, PlayerId, TeamId};

use crate::error::ApiError;
use crate::state::AppState;

/// Submitter key used when no client address header is present.
const UNKNOWN_SUBMITTER: &str = "unknown";

// ---------------------------------------------------------------------------
// Request structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /match-ratings`.
#[derive(Debug, serde::Deserialize)]
pub struct MatchRatingsQuery {
    /// Match to report on. Kept as text so a bad value is a 400 with the
    /// usual error body rather than an extractor rejection.
    pub match_id: Option<String>,
}

/// JSON body of `POST /match-ratings`.
#[derive(Debug, serde::Deserialize)]
pub struct RatingSubmission {
    /// Rated match.
    pub match_id: i64,
    /// Rated player.
    pub player_id: i64,
    /// Score, 1 to 5.
    pub score: i32,
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Report that the process is up. Does not touch the store.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// GET /players/stats
// ---------------------------------------------------------------------------

/// The league statistics table, ranked.
pub async fn player_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let table = state.engine.player_stats().await?;
    Ok(Json(table))
}

// ---------------------------------------------------------------------------
// GET /players/{id}
// ---------------------------------------------------------------------------

/// One player's record, counts, averages and goal list.
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: PlayerId = id_str.parse().map_err(StatsError::from)?;
    let detail = state.engine.player_detail(id).await?;
    Ok(Json(detail))
}

// ---------------------------------------------------------------------------
// GET /teams/{id}
// ---------------------------------------------------------------------------

/// One team's roster, top scorers and match count.
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: TeamId = id_str.parse().map_err(StatsError::from)?;
    let detail = state.engine.team_detail(id).await?;
    Ok(Json(detail))
}

// ---------------------------------------------------------------------------
// GET /match-ratings?match_id=
// ---------------------------------------------------------------------------

/// Average rating per player for one match.
pub async fn match_ratings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MatchRatingsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let raw = params
        .match_id
        .ok_or_else(|| StatsError::InvalidScope("match_id is required".to_owned()))?;
    let match_id: MatchId = raw.parse().map_err(StatsError::from)?;
    let ratings = state.engine.match_ratings(match_id).await?;
    Ok(Json(ratings))
}

// ---------------------------------------------------------------------------
// POST /match-ratings
// ---------------------------------------------------------------------------

/// Record a peer rating, replacing the caller's earlier score for the same
/// match and player.
pub async fn submit_rating(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<RatingSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(submission) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let match_id = MatchId::positive(submission.match_id).map_err(StatsError::from)?;
    let player_id = PlayerId::positive(submission.player_id).map_err(StatsError::from)?;
    let submitter = submitter_key(&headers);

    let rating = state
        .engine
        .submit_rating(match_id, player_id, submission.score, &submitter)
        .await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Client address used as the rating idempotency key: the first
/// `X-Forwarded-For` entry, else `X-Real-IP`, else `"unknown"`.
///
/// Both headers are client-controlled; the key is never used to
/// authorise anything.
pub fn submitter_key(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header("x-forwarded-for")
        .and_then(|list| list.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header("x-real-ip"))
        .unwrap_or(UNKNOWN_SUBMITTER)
        .to_owned()
}
