//! Derived-statistics aggregation engine for the league.
//!
//! Computes per-player and per-team figures (goals, matches played, peer
//! rating averages, skill ratings, leaderboards) from goal, roster and
//! rating rows whose parent match may have been deleted without cascade.
//!
//! # Pipeline
//!
//! ```text
//! request
//!   |
//!   +-- Snapshot::load(reader, scope)   read matches + scoped rows
//!   |
//!   +-- filter_live(rows, live set)     drop rows of deleted matches
//!   |
//!   +-- aggregate / rating folds        counts, distinct matches, means
//!   |
//!   +-- report::*                       shape, sort, rank
//! ```
//!
//! Every step after the load is a pure function of the snapshot. Nothing
//! is cached across requests.
//!
//! # Modules
//!
//! - [`scope`] -- [`Scope`] of a read
//! - [`store`] -- [`EventStoreReader`] / [`RatingRecorder`] seam and [`Snapshot`]
//! - [`liveness`] -- [`LiveMatchSet`] and the liveness filter
//! - [`aggregate`] -- goal / appearance folds and leaderboard ordering
//! - [`rating`] -- peer-rating averages and the overall skill rating
//! - [`report`] -- statistics table, player bundle, team bundle, match ratings
//! - [`engine`] -- [`StatsEngine`], one method per endpoint
//! - [`memory`] -- [`MemoryStore`], an in-memory store
//! - [`error`] -- [`StatsError`]

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod liveness;
pub mod memory;
pub mod rating;
pub mod report;
pub mod scope;
pub mod store;

// Re-export primary types for convenience.
pub use engine::StatsEngine;
pub use error::StatsError;
pub use liveness::{Live, LiveMatchSet, MatchBound, Sided, filter_live};
pub use memory::{MemoryData, MemoryStore};
pub use scope::Scope;
pub use store::{EventStoreReader, RatingRecorder, Snapshot};
