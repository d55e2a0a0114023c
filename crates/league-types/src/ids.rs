//! Type-safe identifier wrappers around the store's `BIGINT` keys.
//!
//! Every record kind has its own ID type so a goal's match reference can
//! never be handed to a player lookup by accident. The raw integers come
//! from the store's identity columns; the engine never allocates them.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Error returned when a textual identifier cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    /// The text is not a base-10 integer.
    #[error("not a numeric identifier: {0}")]
    NotNumeric(String),

    /// Identity columns start at 1; zero and negatives never name a row.
    #[error("identifier must be positive, got {0}")]
    NotPositive(i64),
}

/// Generates a newtype wrapper around `i64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(#[ts(type = "number")] pub i64);

        impl $name {
            /// Wrap an identifier received from a client, rejecting values
            /// no identity column can hold.
            ///
            /// # Errors
            ///
            /// [`IdParseError::NotPositive`] for zero or a negative value.
            pub fn positive(raw: i64) -> Result<Self, IdParseError> {
                if raw <= 0 {
                    return Err(IdParseError::NotPositive(raw));
                }
                Ok(Self(raw))
            }

            /// Return the inner `i64` value.
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw: i64 = s
                    .trim()
                    .parse()
                    .map_err(|e: core::num::ParseIntError| {
                        IdParseError::NotNumeric(format!("{s:?} ({e})"))
                    })?;
                Self::positive(raw)
            }
        }
    };
}

define_id! {
    /// Unique identifier for a played (or scheduled) match.
    MatchId
}

define_id! {
    /// Unique identifier for a registered player.
    PlayerId
}

define_id! {
    /// Unique identifier for a team.
    TeamId
}

define_id! {
    /// Unique identifier for a single recorded goal.
    GoalId
}

define_id! {
    /// Unique identifier for a roster (appearance) record.
    RosterEntryId
}

define_id! {
    /// Unique identifier for a peer rating.
    RatingId
}
