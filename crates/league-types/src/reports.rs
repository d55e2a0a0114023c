//! Wire shapes produced by the statistics engine.
//!
//! Absent figures (no ratings, no populated skills, no recorded minute)
//! serialize as `null`. A genuine zero is only ever used for counts.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::TeamSide;
use crate::ids::{MatchId, PlayerId};
use crate::structs::{Match, Player, Team};

/// One row of the league-wide statistics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerStatsRow {
    /// Player identifier.
    pub id: PlayerId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Team name as stored on the player.
    pub team: Option<String>,
    /// Goals in live matches.
    pub goals: u32,
    /// Distinct live matches with a roster entry.
    pub matches_played: u32,
    /// Mean peer rating over live matches, one decimal.
    #[serde(with = "rust_decimal::serde::float_option")]
    #[ts(as = "Option<f64>")]
    pub average_rating: Option<Decimal>,
    /// Number of live peer ratings behind `average_rating`.
    pub rating_count: u32,
    /// Averaged skill attributes plus bonus, 0..=100.
    pub overall_rating: Option<u8>,
}

/// The parts of a match shown next to a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MatchSummary {
    /// Match identifier.
    pub id: MatchId,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Home goals.
    pub home_score: i32,
    /// Away goals.
    pub away_score: i32,
    /// Match day.
    pub date: NaiveDate,
}

impl From<&Match> for MatchSummary {
    fn from(m: &Match) -> Self {
        Self {
            id: m.id,
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            home_score: m.home_score,
            away_score: m.away_score,
            date: m.date,
        }
    }
}

/// A single goal in a player's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GoalDetail {
    /// Minute of play, when recorded.
    pub goal_minute: Option<i32>,
    /// Side the goal counted for.
    pub team_type: Option<TeamSide>,
    /// The (live) match the goal was scored in.
    #[serde(rename = "match")]
    pub match_info: MatchSummary,
}

/// Everything shown on a player's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerDetail {
    /// The player record, inlined at the top level.
    #[serde(flatten)]
    pub player: Player,
    /// Goals in live matches.
    pub goals: u32,
    /// Distinct live matches played.
    pub matches_played: u32,
    /// Mean peer rating over live matches.
    #[serde(with = "rust_decimal::serde::float_option")]
    #[ts(as = "Option<f64>")]
    pub average_rating: Option<Decimal>,
    /// Number of live peer ratings.
    pub rating_count: u32,
    /// Skill rating, when any attribute is populated.
    pub overall_rating: Option<u8>,
    /// Goals, newest match first.
    pub goals_details: Vec<GoalDetail>,
}

/// A roster line on a team's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RosterPlayer {
    /// Player identifier.
    pub id: PlayerId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Playing position.
    pub position: Option<String>,
    /// Injury flag.
    pub injured: Option<bool>,
    /// Goals credited to this team in live matches.
    pub goals: u32,
    /// Distinct live matches played for this team.
    pub matches_played: u32,
    /// Skill rating.
    pub overall_rating: Option<u8>,
}

/// A leaderboard line. Only players with at least one goal appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TopScorer {
    /// Player identifier.
    pub player_id: PlayerId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Goal count, always positive.
    pub goals: u32,
}

/// Everything shown on a team's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TeamDetail {
    /// The team record.
    pub team: Team,
    /// Players whose `team` field equals this team's name.
    pub players: Vec<RosterPlayer>,
    /// Up to ten scorers for this team.
    #[serde(rename = "topScorers")]
    pub top_scorers: Vec<TopScorer>,
    /// Live matches with this team on either side.
    #[serde(rename = "matchesCount")]
    pub matches_count: u32,
}

/// Mean and sample size of a group of peer ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RatingSummary {
    /// Mean score, one decimal; `null` when `count` is zero.
    #[serde(with = "rust_decimal::serde::float_option")]
    #[ts(as = "Option<f64>")]
    pub average: Option<Decimal>,
    /// Number of ratings averaged.
    pub count: u32,
}

/// Per-player rating summaries for one match, keyed by player.
pub type MatchRatings = BTreeMap<PlayerId, RatingSummary>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_average_serializes_as_null() {
        let summary = RatingSummary {
            average: None,
            count: 0,
        };
        let json = serde_json::to_value(summary).unwrap_or_default();
        assert!(json["average"].is_null());
        assert_eq!(json["count"], 0);
    }

    #[test]
    fn average_serializes_as_number() {
        let summary = RatingSummary {
            average: Some(Decimal::new(47, 1)),
            count: 3,
        };
        let json = serde_json::to_value(summary).unwrap_or_default();
        assert_eq!(json["average"], serde_json::json!(4.7));
    }

    #[test]
    fn player_detail_inlines_the_player_record() {
        let detail = PlayerDetail {
            player: Player {
                id: PlayerId(4),
                first_name: "Pero".to_owned(),
                last_name: "Peric".to_owned(),
                team: Some("A".to_owned()),
                position: None,
                skills: crate::structs::SkillAttributes::default(),
                injured: None,
                rating_bonus: None,
            },
            goals: 2,
            matches_played: 1,
            average_rating: None,
            rating_count: 0,
            overall_rating: None,
            goals_details: Vec::new(),
        };
        let json = serde_json::to_value(&detail).unwrap_or_default();
        assert_eq!(json["id"], 4);
        assert_eq!(json["first_name"], "Pero");
        assert_eq!(json["team"], "A");
        assert_eq!(json["goals"], 2);
        assert!(json["goals_details"].is_array());
        assert!(json.get("player").is_none());
    }

    #[test]
    fn match_ratings_keys_are_strings() {
        let mut ratings = MatchRatings::new();
        ratings.insert(
            PlayerId(9),
            RatingSummary {
                average: Some(Decimal::new(5, 0)),
                count: 1,
            },
        );
        let json = serde_json::to_value(&ratings).unwrap_or_default();
        assert_eq!(json["9"]["count"], 1);
    }
}
