//! Shared type definitions for the league statistics service.
//!
//! This crate is the single source of truth for record and report types
//! used across the workspace. Report shapes flow to `TypeScript` via
//! `ts-rs` for the league UI.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe wrappers for all store identifiers
//! - [`enums`] -- [`TeamSide`]
//! - [`structs`] -- Stored records (matches, goals, roster, ratings, players, teams)
//! - [`reports`] -- Wire shapes returned by the statistics endpoints

pub mod enums;
pub mod ids;
pub mod reports;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::TeamSide;
pub use ids::{GoalId, IdParseError, MatchId, PlayerId, RatingId, RosterEntryId, TeamId};
pub use reports::{
    GoalDetail, MatchRatings, MatchSummary, PlayerDetail, PlayerStatsRow, RatingSummary,
    RosterPlayer, TeamDetail, TopScorer,
};
pub use structs::{
    Goal, MAX_RATING_SCORE, MAX_SKILL_VALUE, MIN_RATING_SCORE, Match, NewRating, Player, Rating,
    RosterEntry, SkillAttributes, Team, is_valid_rating_score,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Files are written to `bindings/` relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::MatchId::export_all();
        let _ = crate::ids::PlayerId::export_all();
        let _ = crate::ids::TeamId::export_all();
        let _ = crate::ids::GoalId::export_all();
        let _ = crate::ids::RosterEntryId::export_all();
        let _ = crate::ids::RatingId::export_all();

        // Enums
        let _ = crate::enums::TeamSide::export_all();

        // Records
        let _ = crate::structs::Match::export_all();
        let _ = crate::structs::Goal::export_all();
        let _ = crate::structs::RosterEntry::export_all();
        let _ = crate::structs::Rating::export_all();
        let _ = crate::structs::SkillAttributes::export_all();
        let _ = crate::structs::Player::export_all();
        let _ = crate::structs::Team::export_all();

        // Reports
        let _ = crate::reports::PlayerStatsRow::export_all();
        let _ = crate::reports::MatchSummary::export_all();
        let _ = crate::reports::GoalDetail::export_all();
        let _ = crate::reports::PlayerDetail::export_all();
        let _ = crate::reports::RosterPlayer::export_all();
        let _ = crate::reports::TopScorer::export_all();
        let _ = crate::reports::TeamDetail::export_all();
        let _ = crate::reports::RatingSummary::export_all();
    }
}
