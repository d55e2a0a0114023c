//! Rating averager: peer-rating means and the overall skill rating.
//!
//! Absence is never folded into zero. A player nobody has rated has no
//! average, and a player with no populated skill attribute has no overall
//! rating.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use league_types::{MAX_SKILL_VALUE, Player, PlayerId, Rating, RatingSummary};

use crate::liveness::{Live, MatchBound};

/// Decimal places kept on a peer-rating average.
const AVERAGE_DECIMALS: u32 = 1;

/// Mean and count of a group of 1..=5 scores.
///
/// The mean is rounded to one decimal, half away from zero. An empty
/// group has no mean and a count of zero.
pub fn summarize(scores: impl IntoIterator<Item = i32>) -> RatingSummary {
    let mut sum: i64 = 0;
    let mut count: u32 = 0;
    for score in scores {
        sum = sum.saturating_add(i64::from(score));
        count = count.saturating_add(1);
    }
    let average = Decimal::from(sum)
        .checked_div(Decimal::from(count))
        .map(|mean| {
            mean.round_dp_with_strategy(AVERAGE_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        });
    RatingSummary { average, count }
}

/// Group live ratings by player and summarize each group.
///
/// Rows without a player or with a score outside 1..=5 are skipped.
pub fn average_by_player(ratings: &Live<'_, Rating>) -> HashMap<PlayerId, RatingSummary> {
    let mut groups: HashMap<PlayerId, Vec<i32>> = HashMap::new();
    let mut skipped = 0_usize;
    for rating in ratings.iter() {
        match rating.player_ref() {
            Some(player) if rating.has_valid_score() => {
                groups.entry(player).or_default().push(rating.score);
            }
            _ => skipped = skipped.saturating_add(1),
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "Skipped malformed ratings");
    }
    groups
        .into_iter()
        .map(|(player, scores)| (player, summarize(scores)))
        .collect()
}

/// Summary for a player with no ratings at all.
pub const fn unrated() -> RatingSummary {
    RatingSummary {
        average: None,
        count: 0,
    }
}

/// The player's overall skill rating in 0..=100.
///
/// Populated attributes inside 0..=100 are averaged and rounded half-up;
/// attributes outside that range are treated as absent. `rating_bonus`
/// is then added and the result clamped to 0..=100. With no usable
/// attribute the rating is absent, bonus or not.
pub fn overall_rating(player: &Player) -> Option<u8> {
    let mut sum: i64 = 0;
    let mut count: i64 = 0;
    for value in player.skills.values().into_iter().flatten() {
        if (0..=MAX_SKILL_VALUE).contains(&value) {
            sum = sum.saturating_add(i64::from(value));
            count = count.saturating_add(1);
        }
    }
    if count == 0 {
        return None;
    }
    // Half-up on non-negative values: floor((2 * sum + count) / (2 * count)).
    let base = sum
        .saturating_mul(2)
        .saturating_add(count)
        .checked_div(count.saturating_mul(2))?;
    let bonus = player.rating_bonus.map_or(0, i64::from);
    let total = base
        .saturating_add(bonus)
        .clamp(0, i64::from(MAX_SKILL_VALUE));
    u8::try_from(total).ok()
}
