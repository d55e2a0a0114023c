//! Axum router construction.
//!
//! Assembles every route into a single [`Router`] with permissive CORS
//! for the browser front end and request tracing.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete router.
///
/// - `GET /health`
/// - `GET /players/stats`
/// - `GET /players/{id}`
/// - `GET /teams/{id}`
/// - `GET /match-ratings?match_id=`
/// - `POST /match-ratings`
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        // `/players/stats` is a static segment and takes priority over `{id}`.
        .route("/players/stats", get(handlers::player_stats))
        .route("/players/{id}", get(handlers::get_player))
        .route("/teams/{id}", get(handlers::get_team))
        .route(
            "/match-ratings",
            get(handlers::match_ratings).post(handlers::submit_rating),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
