//! League statistics server binary.
//!
//! Wires configuration, logging, the `PostgreSQL` store and the HTTP API
//! together and serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `league-config.yaml` (or `LEAGUE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Connect the `PostgreSQL` event store
//! 4. Apply migrations, unless disabled
//! 5. Build the statistics engine over the store
//! 6. Serve the API until `Ctrl-C`, then close the store

mod config;
mod error;

use std::sync::Arc;

use league_api::{AppState, start_server};
use league_db::PgEventStore;
use league_stats::StatsEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{LeagueConfig, LoggingSection};
use crate::error::AppError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the database connection or the
/// server fails.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration. Logging depends on it, so this comes first.
    let config = LeagueConfig::load()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("league-server starting");
    info!(
        host = config.server.host,
        port = config.server.port,
        max_connections = config.database.max_connections,
        run_migrations = config.database.run_migrations,
        "Configuration loaded"
    );

    // 3. Connect to PostgreSQL.
    let store = Arc::new(PgEventStore::connect(&config.database.to_store_settings()).await?);

    // 4. Migrations.
    if config.database.run_migrations {
        store.run_migrations().await?;
    } else {
        info!("Skipping migrations");
    }

    // 5. Engine over the store.
    let state = Arc::new(AppState::new(StatsEngine::new(Arc::clone(&store))));

    // 6. Serve until Ctrl-C.
    let served = start_server(&config.server.to_server_config(), state).await;
    store.close().await;
    served?;

    info!("league-server shutdown complete");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level; an unparseable level falls back to `info`.
fn init_tracing(logging: &LoggingSection) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
