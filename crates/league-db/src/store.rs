//! [`PgEventStore`]: the `PostgreSQL` implementation of the engine's store
//! traits.
//!
//! Event rows (goals, roster entries, ratings) are read in scope but never
//! joined against `matches`: a row whose match was deleted is still
//! returned, and the engine's liveness filter discards it. Joining here
//! would hide the orphan count the engine logs.

use async_trait::async_trait;
use league_stats::{EventStoreReader, RatingRecorder, Scope, StatsError};
use league_types::{
    Goal, Match, NewRating, Player, PlayerId, Rating, RatingId, RosterEntry, Team, TeamId,
};
use sqlx::PgPool;
use sqlx::postgres::PgRow;

use crate::error::DbError;
use crate::rows::{
    GoalRow, MATCH_COLUMNS, MatchRow, PLAYER_COLUMNS, PlayerRow, RatingRow, RosterRow, TeamRow,
};
use crate::settings::StoreSettings;

/// Reader and rating recorder over the league tables.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    /// Open a connection pool and wrap it.
    ///
    /// # Errors
    ///
    /// [`DbError::Config`] if the URL cannot be parsed and
    /// [`DbError::Postgres`] if no connection can be made.
    pub async fn connect(settings: &StoreSettings) -> Result<Self, DbError> {
        let options = settings.connect_options()?;
        let pool = settings.pool_options().connect_with(options).await?;
        tracing::info!(
            max_connections = settings.max_connections,
            "Event store connected"
        );
        Ok(Self { pool })
    }

    /// Bring the league tables up to date with `migrations/`.
    ///
    /// # Errors
    ///
    /// [`DbError::Migration`] if any migration fails.
    pub async fn run_migrations(&self) -> Result<(), DbError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("League schema migrated");
        Ok(())
    }

    /// Close the pool, waiting for in-flight reads to return their
    /// connections.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Event store closed");
    }

    /// Select `columns` from an event table, restricted to `scope`.
    async fn fetch_events<R>(
        &self,
        table: &str,
        columns: &str,
        scope: &Scope,
    ) -> Result<Vec<R>, DbError>
    where
        R: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
    {
        let base = format!("SELECT {columns} FROM {table}");
        let rows = match scope {
            Scope::All => {
                let sql = format!("{base} ORDER BY id");
                sqlx::query_as::<_, R>(&sql).fetch_all(&self.pool).await?
            }
            Scope::Player(id) => {
                let sql = format!("{base} WHERE player_id = $1 ORDER BY id");
                sqlx::query_as::<_, R>(&sql)
                    .bind(id.into_inner())
                    .fetch_all(&self.pool)
                    .await?
            }
            Scope::Match(id) => {
                let sql = format!("{base} WHERE match_id = $1 ORDER BY id");
                sqlx::query_as::<_, R>(&sql)
                    .bind(id.into_inner())
                    .fetch_all(&self.pool)
                    .await?
            }
            Scope::Team(name) => {
                let sql = format!(
                    "{base} WHERE match_id IN \
                     (SELECT id FROM matches WHERE home_team = $1 OR away_team = $1) \
                     ORDER BY id"
                );
                sqlx::query_as::<_, R>(&sql)
                    .bind(name.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        tracing::debug!(table, scope = scope.kind(), count = rows.len(), "Fetched event rows");
        Ok(rows)
    }

    async fn fetch_players(&self, scope: &Scope) -> Result<Vec<PlayerRow>, DbError> {
        let rows = match scope {
            Scope::All | Scope::Match(_) => {
                let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY id");
                sqlx::query_as::<_, PlayerRow>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
            Scope::Player(id) => {
                let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = $1");
                sqlx::query_as::<_, PlayerRow>(&sql)
                    .bind(id.into_inner())
                    .fetch_all(&self.pool)
                    .await?
            }
            Scope::Team(name) => {
                let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE team = $1 ORDER BY id");
                sqlx::query_as::<_, PlayerRow>(&sql)
                    .bind(name.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    async fn record(&self, rating: &NewRating) -> Result<RatingId, DbError> {
        let mut tx = self.pool.begin().await?;

        let updated: Vec<i64> = sqlx::query_scalar::<_, i64>(
            r"UPDATE ratings SET score = $1
              WHERE match_id = $2 AND player_id = $3 AND submitter = $4
              RETURNING id",
        )
        .bind(rating.score)
        .bind(rating.match_id.into_inner())
        .bind(rating.player_id.into_inner())
        .bind(&rating.submitter)
        .fetch_all(&mut *tx)
        .await?;

        let id = if let Some(&id) = updated.iter().min() {
            id
        } else {
            sqlx::query_scalar::<_, i64>(
                r"INSERT INTO ratings (match_id, player_id, score, submitter)
                  VALUES ($1, $2, $3, $4)
                  RETURNING id",
            )
            .bind(rating.match_id.into_inner())
            .bind(rating.player_id.into_inner())
            .bind(rating.score)
            .bind(&rating.submitter)
            .fetch_one(&mut *tx)
            .await?
        };

        tx.commit().await?;
        tracing::debug!(id, overwritten = !updated.is_empty(), "Rating stored");
        Ok(RatingId(id))
    }
}

#[async_trait]
impl EventStoreReader for PgEventStore {
    async fn list_matches(&self) -> Result<Vec<Match>, StatsError> {
        let sql = format!("SELECT {MATCH_COLUMNS} FROM matches ORDER BY id");
        let rows = sqlx::query_as::<_, MatchRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;
        Ok(rows.into_iter().map(Match::from).collect())
    }

    async fn list_goals(&self, scope: &Scope) -> Result<Vec<Goal>, StatsError> {
        let rows: Vec<GoalRow> = self
            .fetch_events("goals", "id, match_id, player_id, team_type, goal_minute", scope)
            .await?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    async fn list_roster(&self, scope: &Scope) -> Result<Vec<RosterEntry>, StatsError> {
        let rows: Vec<RosterRow> = self
            .fetch_events("roster_entries", "id, match_id, player_id, team_type", scope)
            .await?;
        Ok(rows.into_iter().map(RosterEntry::from).collect())
    }

    async fn list_ratings(&self, scope: &Scope) -> Result<Vec<Rating>, StatsError> {
        let rows: Vec<RatingRow> = self
            .fetch_events("ratings", "id, match_id, player_id, score, submitter", scope)
            .await?;
        let total = rows.len();
        let ratings: Vec<Rating> = rows.into_iter().filter_map(RatingRow::into_rating).collect();
        if ratings.len() < total {
            tracing::warn!(
                skipped = total.saturating_sub(ratings.len()),
                "Skipped rating rows without a score"
            );
        }
        Ok(ratings)
    }

    async fn list_players(&self, scope: &Scope) -> Result<Vec<Player>, StatsError> {
        let rows = self.fetch_players(scope).await?;
        Ok(rows.into_iter().map(Player::from).collect())
    }

    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, StatsError> {
        let rows = self.fetch_players(&Scope::Player(id)).await?;
        Ok(rows.into_iter().next().map(Player::from))
    }

    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, StatsError> {
        let row = sqlx::query_as::<_, TeamRow>("SELECT id, name, short_name FROM teams WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?;
        Ok(row.map(Team::from))
    }
}

#[async_trait]
impl RatingRecorder for PgEventStore {
    async fn submit_rating(&self, rating: NewRating) -> Result<Rating, StatsError> {
        let id = self.record(&rating).await?;
        Ok(Rating {
            id,
            match_id: Some(rating.match_id),
            player_id: Some(rating.player_id),
            score: rating.score,
            submitter: Some(rating.submitter),
        })
    }
}
