//! The liveness filter.
//!
//! Matches can be deleted without touching the goals, roster entries and
//! ratings that reference them. Every aggregate is therefore defined over
//! the rows whose parent match is still present. [`LiveMatchSet`] is the
//! authoritative set of match identifiers observed at the start of a
//! request, and [`filter_live`] is the only way to obtain a [`Live`] view,
//! which is what every fold in this crate accepts.
//!
//! # Invariants
//!
//! - A row with no `match_id`, or with a `match_id` outside the live set,
//!   never reaches a fold.
//! - Filtering is idempotent: filtering an already-live view again yields
//!   the same rows.
//! - An empty live set filters everything; aggregates collapse to zero or
//!   absent, never to an error.

use std::collections::HashSet;

use league_types::{Goal, Match, MatchId, PlayerId, Rating, RosterEntry, TeamSide};

/// A row that hangs off a match and concerns one player.
pub trait MatchBound {
    /// The referenced match, if the row carries one.
    fn match_ref(&self) -> Option<MatchId>;

    /// The referenced player, if the row carries one.
    fn player_ref(&self) -> Option<PlayerId>;
}

/// A [`MatchBound`] row that also records which side it belongs to.
pub trait Sided: MatchBound {
    /// The side indicator, if present and well-formed.
    fn side(&self) -> Option<TeamSide>;
}

impl MatchBound for Goal {
    fn match_ref(&self) -> Option<MatchId> {
        self.match_id
    }

    fn player_ref(&self) -> Option<PlayerId> {
        self.player_id
    }
}

impl Sided for Goal {
    fn side(&self) -> Option<TeamSide> {
        self.team_type
    }
}

impl MatchBound for RosterEntry {
    fn match_ref(&self) -> Option<MatchId> {
        self.match_id
    }

    fn player_ref(&self) -> Option<PlayerId> {
        self.player_id
    }
}

impl Sided for RosterEntry {
    fn side(&self) -> Option<TeamSide> {
        self.team_type
    }
}

impl MatchBound for Rating {
    fn match_ref(&self) -> Option<MatchId> {
        self.match_id
    }

    fn player_ref(&self) -> Option<PlayerId> {
        self.player_id
    }
}

// ---------------------------------------------------------------------------
// LiveMatchSet
// ---------------------------------------------------------------------------

/// Identifiers of the matches that currently exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveMatchSet {
    ids: HashSet<MatchId>,
}

impl LiveMatchSet {
    /// Build the set from the full list of current matches.
    pub fn from_matches(matches: &[Match]) -> Self {
        matches.iter().map(|m| m.id).collect()
    }

    /// Whether a match with this identifier exists.
    pub fn contains(&self, id: MatchId) -> bool {
        self.ids.contains(&id)
    }

    /// Whether the row's parent match exists.
    pub fn is_live<T: MatchBound>(&self, row: &T) -> bool {
        row.match_ref().is_some_and(|id| self.contains(id))
    }
}

impl FromIterator<MatchId> for LiveMatchSet {
    fn from_iter<I: IntoIterator<Item = MatchId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Live view
// ---------------------------------------------------------------------------

/// Rows that passed the liveness filter, borrowed from the snapshot.
#[derive(Debug)]
pub struct Live<'a, T> {
    rows: Vec<&'a T>,
}

impl<T> Clone for Live<'_, T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
        }
    }
}

impl<'a, T> Live<'a, T> {
    /// Iterate the live rows in their original order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.rows.iter().copied()
    }

    /// Keep only the rows matching `keep`.
    pub fn retain(&self, mut keep: impl FnMut(&T) -> bool) -> Self {
        Self {
            rows: self.rows.iter().copied().filter(|row| keep(*row)).collect(),
        }
    }
}

/// Keep only the rows whose parent match is in `live`.
///
/// O(n) over `rows`, with an O(1) membership test per row.
pub fn filter_live<'a, T: MatchBound>(rows: &'a [T], live: &LiveMatchSet) -> Live<'a, T> {
    let kept: Vec<&'a T> = rows.iter().filter(|row| live.is_live(*row)).collect();
    let orphaned = rows.len().saturating_sub(kept.len());
    if orphaned > 0 {
        tracing::debug!(
            total = rows.len(),
            orphaned,
            "Dropped rows referencing deleted matches"
        );
    }
    Live { rows: kept }
}
