//! Shared application state.

use league_stats::StatsEngine;

/// State handed to every handler.
///
/// Holds no data of its own; every request reads the store afresh through
/// the engine.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The statistics engine over the configured store.
    pub engine: StatsEngine,
}

impl AppState {
    /// Wrap an engine.
    pub const fn new(engine: StatsEngine) -> Self {
        Self { engine }
    }
}
