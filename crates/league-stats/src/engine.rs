//! [`StatsEngine`]: one entry point per endpoint.
//!
//! Each call loads a fresh [`Snapshot`] and folds it. Nothing is cached
//! between calls, so every figure reflects the store as of that read.

use std::sync::Arc;

use league_types::{
    MatchId, MatchRatings, NewRating, PlayerDetail, PlayerId, PlayerStatsRow, Rating, TeamDetail,
    TeamId, is_valid_rating_score,
};

use crate::error::StatsError;
use crate::report;
use crate::scope::Scope;
use crate::store::{EventStoreReader, RatingRecorder, Snapshot};

/// Stateless facade over a store.
#[derive(Clone)]
pub struct StatsEngine {
    reader: Arc<dyn EventStoreReader>,
    recorder: Arc<dyn RatingRecorder>,
}

impl core::fmt::Debug for StatsEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StatsEngine").finish_non_exhaustive()
    }
}

impl StatsEngine {
    /// Build an engine over a store that can both read and record ratings.
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: EventStoreReader + RatingRecorder + 'static,
    {
        Self {
            reader: Arc::clone(&store) as Arc<dyn EventStoreReader>,
            recorder: store,
        }
    }

    /// Build an engine from separate read and write halves.
    pub fn from_parts(reader: Arc<dyn EventStoreReader>, recorder: Arc<dyn RatingRecorder>) -> Self {
        Self { reader, recorder }
    }

    /// The full league statistics table.
    ///
    /// # Errors
    ///
    /// [`StatsError::StoreUnavailable`] if the store cannot be read.
    pub async fn player_stats(&self) -> Result<Vec<PlayerStatsRow>, StatsError> {
        let snapshot = Snapshot::load(self.reader.as_ref(), Scope::All).await?;
        let table = report::stats_table(&snapshot);
        tracing::debug!(rows = table.len(), "Statistics table assembled");
        Ok(table)
    }

    /// One player's detail bundle.
    ///
    /// # Errors
    ///
    /// [`StatsError::NotFound`] if the player does not exist,
    /// [`StatsError::StoreUnavailable`] if the store cannot be read.
    pub async fn player_detail(&self, id: PlayerId) -> Result<PlayerDetail, StatsError> {
        tracing::debug!(player_id = %id, "Assembling player detail");
        let snapshot = Snapshot::load(self.reader.as_ref(), Scope::Player(id)).await?;
        report::player_detail(id, &snapshot).ok_or_else(|| StatsError::not_found("player", id))
    }

    /// One team's detail bundle.
    ///
    /// # Errors
    ///
    /// [`StatsError::NotFound`] if the team does not exist,
    /// [`StatsError::StoreUnavailable`] if the store cannot be read.
    pub async fn team_detail(&self, id: TeamId) -> Result<TeamDetail, StatsError> {
        tracing::debug!(team_id = %id, "Assembling team detail");
        let team = self
            .reader
            .get_team(id)
            .await?
            .ok_or_else(|| StatsError::not_found("team", id))?;
        let snapshot = Snapshot::load(self.reader.as_ref(), Scope::Team(team.name.clone())).await?;
        Ok(report::team_detail(team, &snapshot))
    }

    /// Per-player average ratings for one match.
    ///
    /// # Errors
    ///
    /// [`StatsError::StoreUnavailable`] if the store cannot be read.
    pub async fn match_ratings(&self, match_id: MatchId) -> Result<MatchRatings, StatsError> {
        let snapshot = Snapshot::load(self.reader.as_ref(), Scope::Match(match_id)).await?;
        let ratings = report::match_ratings(match_id, &snapshot);
        tracing::debug!(match_id = %match_id, players = ratings.len(), "Match ratings assembled");
        Ok(ratings)
    }

    /// Record (or overwrite) a peer rating.
    ///
    /// `submitter` is a network-origin key; it only decides whether this
    /// submission replaces an earlier one.
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidRating`] for a score outside 1..=5,
    /// [`StatsError::NotFound`] if the match or player does not exist,
    /// [`StatsError::StoreUnavailable`] if the store fails.
    pub async fn submit_rating(
        &self,
        match_id: MatchId,
        player_id: PlayerId,
        score: i32,
        submitter: &str,
    ) -> Result<Rating, StatsError> {
        if !is_valid_rating_score(score) {
            return Err(StatsError::InvalidRating(format!(
                "score must be between 1 and 5, got {score}"
            )));
        }
        let matches = self.reader.list_matches().await?;
        if !matches.iter().any(|m| m.id == match_id) {
            return Err(StatsError::not_found("match", match_id));
        }
        if self.reader.get_player(player_id).await?.is_none() {
            return Err(StatsError::not_found("player", player_id));
        }

        let rating = self
            .recorder
            .submit_rating(NewRating {
                match_id,
                player_id,
                score,
                submitter: submitter.to_owned(),
            })
            .await?;
        tracing::info!(
            rating_id = %rating.id,
            match_id = %match_id,
            player_id = %player_id,
            score,
            "Rating recorded"
        );
        Ok(rating)
    }
}
