//! In-memory store implementing [`EventStoreReader`] and [`RatingRecorder`].
//!
//! Behaves like the `PostgreSQL` store, including the lack of cascading
//! deletes: [`MemoryStore::delete_match`] removes only the match row.
//! Used by tests and for running the API without a database.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::{RwLock, RwLockWriteGuard};

use league_types::{
    Goal, Match, MatchId, NewRating, Player, PlayerId, Rating, RatingId, RosterEntry, Team, TeamId,
};

use crate::error::StatsError;
use crate::liveness::MatchBound;
use crate::scope::Scope;
use crate::store::{EventStoreReader, RatingRecorder};

/// Raw tables held by a [`MemoryStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryData {
    /// Match rows.
    pub matches: Vec<Match>,
    /// Goal rows.
    pub goals: Vec<Goal>,
    /// Roster rows.
    pub roster: Vec<RosterEntry>,
    /// Rating rows.
    pub ratings: Vec<Rating>,
    /// Player rows.
    pub players: Vec<Player>,
    /// Team rows.
    pub teams: Vec<Team>,
}

impl MemoryData {
    fn team_match_ids(&self, team: &str) -> HashSet<MatchId> {
        self.matches
            .iter()
            .filter(|m| m.involves(team))
            .map(|m| m.id)
            .collect()
    }

    fn scoped<T: MatchBound + Clone>(&self, rows: &[T], scope: &Scope) -> Vec<T> {
        match scope {
            Scope::All => rows.to_vec(),
            Scope::Player(id) => rows
                .iter()
                .filter(|r| r.player_ref() == Some(*id))
                .cloned()
                .collect(),
            Scope::Match(id) => rows
                .iter()
                .filter(|r| r.match_ref() == Some(*id))
                .cloned()
                .collect(),
            Scope::Team(name) => {
                let ids = self.team_match_ids(name);
                rows.iter()
                    .filter(|r| r.match_ref().is_some_and(|m| ids.contains(&m)))
                    .cloned()
                    .collect()
            }
        }
    }

    fn next_rating_id(&self) -> RatingId {
        let max = self.ratings.iter().map(|r| r.id.0).max().unwrap_or(0);
        RatingId(max.saturating_add(1))
    }
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
}

impl MemoryStore {
    /// Create a store holding `data`.
    pub fn new(data: MemoryData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Direct write access to the tables, for seeding and admin-style edits.
    pub async fn write(&self) -> RwLockWriteGuard<'_, MemoryData> {
        self.data.write().await
    }

    /// Delete a match row without touching its goals, roster or ratings.
    ///
    /// Returns whether a row was removed.
    pub async fn delete_match(&self, id: MatchId) -> bool {
        let mut data = self.data.write().await;
        let before = data.matches.len();
        data.matches.retain(|m| m.id != id);
        data.matches.len() != before
    }
}

#[async_trait]
impl EventStoreReader for MemoryStore {
    async fn list_matches(&self) -> Result<Vec<Match>, StatsError> {
        Ok(self.data.read().await.matches.clone())
    }

    async fn list_goals(&self, scope: &Scope) -> Result<Vec<Goal>, StatsError> {
        let data = self.data.read().await;
        Ok(data.scoped(&data.goals, scope))
    }

    async fn list_roster(&self, scope: &Scope) -> Result<Vec<RosterEntry>, StatsError> {
        let data = self.data.read().await;
        Ok(data.scoped(&data.roster, scope))
    }

    async fn list_ratings(&self, scope: &Scope) -> Result<Vec<Rating>, StatsError> {
        let data = self.data.read().await;
        Ok(data.scoped(&data.ratings, scope))
    }

    async fn list_players(&self, scope: &Scope) -> Result<Vec<Player>, StatsError> {
        let data = self.data.read().await;
        let players = match scope {
            Scope::All | Scope::Match(_) => data.players.clone(),
            Scope::Player(id) => data.players.iter().filter(|p| p.id == *id).cloned().collect(),
            Scope::Team(name) => data
                .players
                .iter()
                .filter(|p| p.plays_for(name))
                .cloned()
                .collect(),
        };
        Ok(players)
    }

    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, StatsError> {
        let data = self.data.read().await;
        Ok(data.players.iter().find(|p| p.id == id).cloned())
    }

    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, StatsError> {
        let data = self.data.read().await;
        Ok(data.teams.iter().find(|t| t.id == id).cloned())
    }
}

#[async_trait]
impl RatingRecorder for MemoryStore {
    async fn submit_rating(&self, rating: NewRating) -> Result<Rating, StatsError> {
        let mut data = self.data.write().await;
        if let Some(existing) = data.ratings.iter_mut().find(|r| {
            r.match_id == Some(rating.match_id)
                && r.player_id == Some(rating.player_id)
                && r.submitter.as_deref() == Some(rating.submitter.as_str())
        }) {
            existing.score = rating.score;
            return Ok(existing.clone());
        }
        let stored = Rating {
            id: data.next_rating_id(),
            match_id: Some(rating.match_id),
            player_id: Some(rating.player_id),
            score: rating.score,
            submitter: Some(rating.submitter),
        };
        data.ratings.push(stored.clone());
        Ok(stored)
    }
}
