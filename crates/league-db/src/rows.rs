//! Row types for the league tables.
//!
//! Rows mirror the columns exactly, nullable where the schema is nullable,
//! and convert into the domain records of `league-types`. The conversion is
//! lenient: an unrecognised `team_type` string becomes `None` and is left
//! for the aggregator to skip, not rejected here.

use chrono::NaiveDate;
use league_types::{
    Goal, GoalId, Match, MatchId, Player, PlayerId, Rating, RatingId, RosterEntry, RosterEntryId,
    SkillAttributes, Team, TeamId, TeamSide,
};

/// Column list for `matches`, in [`MatchRow`] order.
pub(crate) const MATCH_COLUMNS: &str =
    "id, home_team, away_team, home_score, away_score, match_date";

/// Column list for `players`, in [`PlayerRow`] order.
pub(crate) const PLAYER_COLUMNS: &str = "id, first_name, last_name, team, position, pace, \
     shooting, passing, dribbling, defending, physical, goalkeeping, injured, rating_bonus";

/// A row from the `matches` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MatchRow {
    /// Match identifier.
    pub id: i64,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Final home score.
    pub home_score: i32,
    /// Final away score.
    pub away_score: i32,
    /// Calendar date the match was played.
    pub match_date: NaiveDate,
}

impl From<MatchRow> for Match {
    fn from(row: MatchRow) -> Self {
        Self {
            id: MatchId(row.id),
            home_team: row.home_team,
            away_team: row.away_team,
            home_score: row.home_score,
            away_score: row.away_score,
            date: row.match_date,
        }
    }
}

/// A row from the `goals` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GoalRow {
    /// Goal identifier.
    pub id: i64,
    /// Parent match; may point at a deleted match.
    pub match_id: Option<i64>,
    /// Scorer.
    pub player_id: Option<i64>,
    /// `home` or `away`.
    pub team_type: Option<String>,
    /// Minute of the goal.
    pub goal_minute: Option<i32>,
}

impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Self {
            id: GoalId(row.id),
            match_id: row.match_id.map(MatchId),
            player_id: row.player_id.map(PlayerId),
            team_type: parse_side(row.team_type.as_deref()),
            minute: row.goal_minute,
        }
    }
}

/// A row from the `roster_entries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RosterRow {
    /// Entry identifier.
    pub id: i64,
    /// Parent match; may point at a deleted match.
    pub match_id: Option<i64>,
    /// Player who appeared.
    pub player_id: Option<i64>,
    /// `home` or `away`.
    pub team_type: Option<String>,
}

impl From<RosterRow> for RosterEntry {
    fn from(row: RosterRow) -> Self {
        Self {
            id: RosterEntryId(row.id),
            match_id: row.match_id.map(MatchId),
            player_id: row.player_id.map(PlayerId),
            team_type: parse_side(row.team_type.as_deref()),
        }
    }
}

/// A row from the `ratings` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RatingRow {
    /// Rating identifier.
    pub id: i64,
    /// Parent match; may point at a deleted match.
    pub match_id: Option<i64>,
    /// Rated player.
    pub player_id: Option<i64>,
    /// Score, 1 to 5 when well-formed.
    pub score: Option<i32>,
    /// Network-origin key of the submitter.
    pub submitter: Option<String>,
}

impl RatingRow {
    /// Convert into a [`Rating`], or `None` when the score is missing.
    pub fn into_rating(self) -> Option<Rating> {
        let score = self.score?;
        Some(Rating {
            id: RatingId(self.id),
            match_id: self.match_id.map(MatchId),
            player_id: self.player_id.map(PlayerId),
            score,
            submitter: self.submitter,
        })
    }
}

/// A row from the `players` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlayerRow {
    /// Player identifier.
    pub id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Current team name.
    pub team: Option<String>,
    /// Playing position.
    pub position: Option<String>,
    /// Pace attribute.
    pub pace: Option<i32>,
    /// Shooting attribute.
    pub shooting: Option<i32>,
    /// Passing attribute.
    pub passing: Option<i32>,
    /// Dribbling attribute.
    pub dribbling: Option<i32>,
    /// Defending attribute.
    pub defending: Option<i32>,
    /// Physical attribute.
    pub physical: Option<i32>,
    /// Goalkeeping attribute.
    pub goalkeeping: Option<i32>,
    /// Injury flag.
    pub injured: Option<bool>,
    /// Manual adjustment added to the skill rating.
    pub rating_bonus: Option<i32>,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: PlayerId(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            team: row.team,
            position: row.position,
            skills: SkillAttributes {
                pace: row.pace,
                shooting: row.shooting,
                passing: row.passing,
                dribbling: row.dribbling,
                defending: row.defending,
                physical: row.physical,
                goalkeeping: row.goalkeeping,
            },
            injured: row.injured,
            rating_bonus: row.rating_bonus,
        }
    }
}

/// A row from the `teams` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TeamRow {
    /// Team identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Abbreviation.
    pub short_name: Option<String>,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Self {
            id: TeamId(row.id),
            name: row.name,
            short_name: row.short_name,
        }
    }
}

fn parse_side(raw: Option<&str>) -> Option<TeamSide> {
    raw.and_then(TeamSide::parse)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn goal_row_keeps_nulls_and_tolerates_bad_side() {
        let goal: Goal = GoalRow {
            id: 4,
            match_id: Some(9),
            player_id: None,
            team_type: Some("visitors".to_owned()),
            goal_minute: None,
        }
        .into();

        assert_eq!(goal.match_id, Some(MatchId(9)));
        assert_eq!(goal.player_id, None);
        assert_eq!(goal.team_type, None);
    }

    #[test]
    fn side_is_case_insensitive() {
        let entry: RosterEntry = RosterRow {
            id: 1,
            match_id: Some(1),
            player_id: Some(2),
            team_type: Some("AWAY".to_owned()),
        }
        .into();
        assert_eq!(entry.team_type, Some(TeamSide::Away));
    }

    #[test]
    fn rating_without_score_is_dropped() {
        let row = RatingRow {
            id: 1,
            match_id: Some(1),
            player_id: Some(2),
            score: None,
            submitter: None,
        };
        assert!(row.into_rating().is_none());

        let row = RatingRow {
            id: 2,
            match_id: Some(1),
            player_id: Some(2),
            score: Some(4),
            submitter: Some("10.0.0.1".to_owned()),
        };
        assert_eq!(row.into_rating().unwrap().score, 4);
    }

    #[test]
    fn player_row_fills_skills() {
        let player: Player = PlayerRow {
            id: 7,
            first_name: "Ana".to_owned(),
            last_name: "Anic".to_owned(),
            team: Some("Murinjo".to_owned()),
            position: None,
            pace: Some(80),
            shooting: None,
            passing: Some(70),
            dribbling: None,
            defending: None,
            physical: None,
            goalkeeping: None,
            injured: Some(false),
            rating_bonus: Some(2),
        }
        .into();

        assert_eq!(player.skills.pace, Some(80));
        assert_eq!(player.skills.passing, Some(70));
        assert_eq!(player.rating_bonus, Some(2));
    }
}
