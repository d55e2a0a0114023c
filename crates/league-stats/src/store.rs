//! The event store seam.
//!
//! [`EventStoreReader`] abstracts where records come from: `PostgreSQL` in
//! production (`league-db`), [`MemoryStore`](crate::memory::MemoryStore)
//! in tests. [`Snapshot::load`] performs every read one request needs and
//! is the only place the engine touches the store.

use std::collections::HashMap;

use async_trait::async_trait;

use league_types::{Goal, Match, NewRating, Player, PlayerId, Rating, RosterEntry, Team, TeamId};

use crate::aggregate::{MatchIndex, index_matches};
use crate::error::StatsError;
use crate::liveness::{Live, LiveMatchSet, filter_live};
use crate::scope::Scope;

/// Read-only access to the stored records.
///
/// Implementations must not fabricate rows: if a read fails part-way the
/// whole call fails with [`StatsError::StoreUnavailable`].
///
/// Scope semantics for the event kinds (goals, roster, ratings):
/// [`Scope::Player`] keeps rows for that player, [`Scope::Match`] keeps
/// rows for that match, and [`Scope::Team`] keeps rows whose match has the
/// team on either side. For players, [`Scope::Team`] keeps those whose
/// `team` field equals the name and [`Scope::Match`] returns everyone.
#[async_trait]
pub trait EventStoreReader: Send + Sync {
    /// Every match that currently exists.
    async fn list_matches(&self) -> Result<Vec<Match>, StatsError>;

    /// Goal rows in scope.
    async fn list_goals(&self, scope: &Scope) -> Result<Vec<Goal>, StatsError>;

    /// Roster rows in scope.
    async fn list_roster(&self, scope: &Scope) -> Result<Vec<RosterEntry>, StatsError>;

    /// Rating rows in scope.
    async fn list_ratings(&self, scope: &Scope) -> Result<Vec<Rating>, StatsError>;

    /// Player records in scope.
    async fn list_players(&self, scope: &Scope) -> Result<Vec<Player>, StatsError>;

    /// A single player, if it exists.
    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, StatsError>;

    /// A single team, if it exists.
    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, StatsError>;
}

/// Write access for peer ratings.
#[async_trait]
pub trait RatingRecorder: Send + Sync {
    /// Store a rating, overwriting the score of an existing row with the
    /// same (match, player, submitter) instead of adding a second one.
    async fn submit_rating(&self, rating: NewRating) -> Result<Rating, StatsError>;
}

/// All rows one request works on, read once at the start of the request.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Scope the event rows were read with.
    pub scope: Scope,
    /// Every current match (never scoped).
    pub matches: Vec<Match>,
    /// Identifiers of `matches`.
    pub live: LiveMatchSet,
    /// Goal rows in scope, unfiltered.
    pub goals: Vec<Goal>,
    /// Roster rows in scope, unfiltered.
    pub roster: Vec<RosterEntry>,
    /// Rating rows in scope, unfiltered.
    pub ratings: Vec<Rating>,
    /// Player records: the whole directory for a team scope (the roster
    /// and former players still named among its scorers), otherwise those
    /// in scope.
    pub players: Vec<Player>,
}

impl Snapshot {
    /// Read everything `scope` needs.
    ///
    /// The match list is read first so the live set reflects the start of
    /// the request.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::StoreUnavailable`] if any read fails. No
    /// partial snapshot is ever returned.
    pub async fn load(reader: &dyn EventStoreReader, scope: Scope) -> Result<Self, StatsError> {
        let matches = reader.list_matches().await?;
        let goals = reader.list_goals(&scope).await?;
        let roster = reader.list_roster(&scope).await?;
        let ratings = reader.list_ratings(&scope).await?;
        let players = match &scope {
            Scope::Team(_) => reader.list_players(&Scope::All).await?,
            other => reader.list_players(other).await?,
        };
        let live = LiveMatchSet::from_matches(&matches);

        tracing::debug!(
            scope = %scope,
            matches = matches.len(),
            goals = goals.len(),
            roster = roster.len(),
            ratings = ratings.len(),
            players = players.len(),
            "Snapshot loaded"
        );

        Ok(Self {
            scope,
            matches,
            live,
            goals,
            roster,
            ratings,
            players,
        })
    }

    /// Goals whose match still exists.
    pub fn live_goals(&self) -> Live<'_, Goal> {
        filter_live(&self.goals, &self.live)
    }

    /// Roster entries whose match still exists.
    pub fn live_roster(&self) -> Live<'_, RosterEntry> {
        filter_live(&self.roster, &self.live)
    }

    /// Ratings whose match still exists.
    pub fn live_ratings(&self) -> Live<'_, Rating> {
        filter_live(&self.ratings, &self.live)
    }

    /// Current matches by identifier.
    pub fn match_index(&self) -> MatchIndex<'_> {
        index_matches(&self.matches)
    }

    /// Snapshot players by identifier.
    pub fn player_index(&self) -> HashMap<PlayerId, &Player> {
        self.players.iter().map(|p| (p.id, p)).collect()
    }
}
