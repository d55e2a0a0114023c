//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`sqlx`] errors. At the engine boundary every [`DbError`] becomes
//! [`StatsError::StoreUnavailable`].

use league_stats::StatsError;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<DbError> for StatsError {
    fn from(err: DbError) -> Self {
        tracing::error!(error = %err, "Event store read failed");
        Self::StoreUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_db_error_is_store_unavailable() {
        let err: StatsError = DbError::Config("bad url".to_owned()).into();
        assert_eq!(
            err,
            StatsError::StoreUnavailable("Configuration error: bad url".to_owned())
        );

        let err: StatsError = DbError::Postgres(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, StatsError::StoreUnavailable(_)));
    }
}
