//! `PostgreSQL` data layer for the league statistics service.
//!
//! The store is the system of record for matches, goals, roster entries,
//! ratings, players and teams. Event rows reference their match by id with
//! no foreign key, so deleting a match leaves its events behind; the engine
//! in `league-stats` filters those out at read time.
//!
//! ```text
//! StatsEngine
//!     |
//!     +-- EventStoreReader --+
//!     +-- RatingRecorder ----+--> PgEventStore (owns the PgPool)
//! ```
//!
//! # Modules
//!
//! - [`settings`] -- connection target and pool sizing
//! - [`rows`] -- row types and their conversion into domain records
//! - [`store`] -- [`PgEventStore`], the reader and recorder implementation
//! - [`error`] -- Shared error types

pub mod error;
pub mod rows;
pub mod settings;
pub mod store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use settings::StoreSettings;
pub use store::PgEventStore;
