//! Error types for the statistics engine.
//!
//! The taxonomy is small: a request either fails because the
//! store could not be read, because the thing asked for does not exist, or
//! because the request itself was malformed. Individual corrupt rows are
//! not errors; folds skip them.

/// Errors that can occur while computing statistics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// The underlying store could not be reached or a read failed.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The requested record does not exist.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Record kind (`player`, `team`, `match`).
        kind: &'static str,
        /// The identifier as requested.
        id: String,
    },

    /// The request named a scope or identifier that cannot be parsed.
    #[error("invalid scope: {0}")]
    InvalidScope(String),

    /// A rating submission carried an unusable score.
    #[error("invalid rating: {0}")]
    InvalidRating(String),
}

impl StatsError {
    /// Shorthand for [`StatsError::NotFound`].
    pub fn not_found(kind: &'static str, id: impl core::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl From<league_types::IdParseError> for StatsError {
    fn from(err: league_types::IdParseError) -> Self {
        Self::InvalidScope(err.to_string())
    }
}
