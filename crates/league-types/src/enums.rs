//! Enumeration types shared across the workspace.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which side of a match a goal or appearance belongs to.
///
/// Goals and roster entries store only this indicator, never a team
/// reference. The team is recovered by looking at the parent match's
/// `home_team` / `away_team`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum TeamSide {
    /// The home team of the parent match.
    Home,
    /// The away team of the parent match.
    Away,
}

impl TeamSide {
    /// The storage / wire spelling of this side.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Away => "away",
        }
    }

    /// Parse the storage spelling, tolerating case and surrounding blanks.
    ///
    /// Returns `None` for anything else; callers treat that row as malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("home") {
            Some(Self::Home)
        } else if trimmed.eq_ignore_ascii_case("away") {
            Some(Self::Away)
        } else {
            None
        }
    }
}

impl core::fmt::Display for TeamSide {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
