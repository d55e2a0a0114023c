//! Read scopes: which slice of the event store a request needs.
//!
//! Text form is `all`, `player:<id>`, `team:<name>` or `match:<id>`.

use core::str::FromStr;

use league_types::{MatchId, PlayerId};

use crate::error::StatsError;

/// The slice of rows a single request loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every row of every kind.
    All,
    /// Rows whose `player_id` is this player.
    Player(PlayerId),
    /// Rows whose parent match has this team (by name) on either side.
    Team(String),
    /// Rows whose `match_id` is this match.
    Match(MatchId),
}

impl Scope {
    /// Short label for log fields.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Player(_) => "player",
            Self::Team(_) => "team",
            Self::Match(_) => "match",
        }
    }
}

impl core::fmt::Display for Scope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Player(id) => write!(f, "player:{id}"),
            Self::Team(name) => write!(f, "team:{name}"),
            Self::Match(id) => write!(f, "match:{id}"),
        }
    }
}

impl FromStr for Scope {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        let Some((kind, rest)) = s.split_once(':') else {
            return Err(StatsError::InvalidScope(format!("unrecognised scope {s:?}")));
        };
        match kind {
            "player" => Ok(Self::Player(rest.parse()?)),
            "match" => Ok(Self::Match(rest.parse()?)),
            "team" if rest.trim().is_empty() => {
                Err(StatsError::InvalidScope("empty team name".to_owned()))
            }
            "team" => Ok(Self::Team(rest.to_owned())),
            other => Err(StatsError::InvalidScope(format!(
                "unknown scope kind {other:?}"
            ))),
        }
    }
}
