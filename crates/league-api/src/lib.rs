//! HTTP API for the league statistics service.
//!
//! An Axum server exposing the derived statistics as JSON:
//!
//! - `GET /players/stats` -- league-wide statistics table
//! - `GET /players/{id}` -- one player's detail bundle
//! - `GET /teams/{id}` -- one team's roster, top scorers and match count
//! - `GET /match-ratings?match_id=` -- per-player rating averages for a match
//! - `POST /match-ratings` -- submit or overwrite a peer rating
//! - `GET /health` -- liveness probe
//!
//! Handlers parse identifiers, call [`StatsEngine`](league_stats::StatsEngine)
//! and serialize what it returns. Every failure is rendered by
//! [`ApiError`] as `{"error", "status"}`.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
