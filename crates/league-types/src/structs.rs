//! Stored record types: matches, the three event kinds that hang off a
//! match, and the player / team master data.
//!
//! The store enforces no referential integrity. Every field that points at
//! another record is therefore optional on the event kinds, and a present
//! reference may still dangle (the parent match may have been deleted).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::TeamSide;
use crate::ids::{GoalId, MatchId, PlayerId, RatingId, RosterEntryId, TeamId};

/// Lowest valid peer rating score.
pub const MIN_RATING_SCORE: i32 = 1;

/// Highest valid peer rating score.
pub const MAX_RATING_SCORE: i32 = 5;

/// Upper bound of a single skill attribute (lower bound is zero).
pub const MAX_SKILL_VALUE: i32 = 100;

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// A match between two teams, identified by team *name*.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Match {
    /// Store identifier.
    pub id: MatchId,
    /// Name of the home team (free text, equal to some `Team::name`).
    pub home_team: String,
    /// Name of the away team.
    pub away_team: String,
    /// Goals scored by the home team.
    pub home_score: i32,
    /// Goals scored by the away team.
    pub away_score: i32,
    /// Day the match was played.
    pub date: NaiveDate,
}

impl Match {
    /// Name of the team that played on `side`.
    pub fn team_for(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::Home => &self.home_team,
            TeamSide::Away => &self.away_team,
        }
    }

    /// Whether the named team took part, on either side.
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }
}

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// One goal. Several rows may share a (match, player) pair; each row is one goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Goal {
    /// Store identifier.
    pub id: GoalId,
    /// Parent match. May dangle.
    pub match_id: Option<MatchId>,
    /// Scorer.
    pub player_id: Option<PlayerId>,
    /// Side the goal was scored for.
    pub team_type: Option<TeamSide>,
    /// Minute of play, when recorded.
    pub minute: Option<i32>,
}

/// "This player took part in this match for this side."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RosterEntry {
    /// Store identifier.
    pub id: RosterEntryId,
    /// Parent match. May dangle.
    pub match_id: Option<MatchId>,
    /// Participating player.
    pub player_id: Option<PlayerId>,
    /// Side the player appeared for.
    pub team_type: Option<TeamSide>,
}

/// A 1-5 peer rating of one player's performance in one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Rating {
    /// Store identifier.
    pub id: RatingId,
    /// Parent match. May dangle.
    pub match_id: Option<MatchId>,
    /// Rated player.
    pub player_id: Option<PlayerId>,
    /// Score; rows outside 1..=5 are ignored when averaging.
    pub score: i32,
    /// Network-origin key of whoever submitted the rating.
    ///
    /// Only used to make repeated submissions overwrite instead of pile
    /// up. It is trivially spoofable and carries no identity guarantee.
    pub submitter: Option<String>,
}

impl Rating {
    /// Whether the score lies in the accepted 1..=5 range.
    pub const fn has_valid_score(&self) -> bool {
        is_valid_rating_score(self.score)
    }
}

/// Whether `score` is an accepted peer rating value.
pub const fn is_valid_rating_score(score: i32) -> bool {
    score >= MIN_RATING_SCORE && score <= MAX_RATING_SCORE
}

/// A rating submission, before the store assigns it an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRating {
    /// Match being rated.
    pub match_id: MatchId,
    /// Player being rated.
    pub player_id: PlayerId,
    /// Score, 1..=5.
    pub score: i32,
    /// Idempotency key for overwrite (see [`Rating::submitter`]).
    pub submitter: String,
}

// ---------------------------------------------------------------------------
// Master data
// ---------------------------------------------------------------------------

/// The seven optional skill attributes of a player, each in 0..=100.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SkillAttributes {
    /// Speed and acceleration.
    pub pace: Option<i32>,
    /// Finishing and shot power.
    pub shooting: Option<i32>,
    /// Short and long passing.
    pub passing: Option<i32>,
    /// Ball control.
    pub dribbling: Option<i32>,
    /// Tackling and positioning.
    pub defending: Option<i32>,
    /// Strength and stamina.
    pub physical: Option<i32>,
    /// Shot stopping.
    pub goalkeeping: Option<i32>,
}

impl SkillAttributes {
    /// All seven attributes in a fixed order.
    pub const fn values(&self) -> [Option<i32>; 7] {
        [
            self.pace,
            self.shooting,
            self.passing,
            self.dribbling,
            self.defending,
            self.physical,
            self.goalkeeping,
        ]
    }

    /// Every attribute set to `value`.
    pub const fn uniform(value: i32) -> Self {
        Self {
            pace: Some(value),
            shooting: Some(value),
            passing: Some(value),
            dribbling: Some(value),
            defending: Some(value),
            physical: Some(value),
            goalkeeping: Some(value),
        }
    }
}

/// A registered player.
///
/// `team` is a by-value back-reference: it holds a team *name*, not a
/// `TeamId`. Renaming a team leaves its players pointing at the old name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Player {
    /// Store identifier.
    pub id: PlayerId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Name of the team the player currently belongs to.
    pub team: Option<String>,
    /// Playing position, free text.
    pub position: Option<String>,
    /// Skill attributes.
    #[serde(flatten)]
    pub skills: SkillAttributes,
    /// Whether the player is currently injured.
    pub injured: Option<bool>,
    /// Manual adjustment added on top of the averaged skill rating.
    pub rating_bonus: Option<i32>,
}

impl Player {
    /// Whether the player's `team` field names exactly `team` (case-sensitive).
    pub fn plays_for(&self, team: &str) -> bool {
        self.team.as_deref() == Some(team)
    }
}

/// A team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Team {
    /// Store identifier.
    pub id: TeamId,
    /// Display name; players and matches refer to the team by this string.
    pub name: String,
    /// Abbreviation for tight layouts.
    pub short_name: Option<String>,
}
