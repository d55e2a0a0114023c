//! Per-entity folds over live rows.
//!
//! Every function here takes a [`Live`] view, so an unfiltered row can
//! never be counted. Rows without a player reference are malformed; they
//! are skipped and reported once per fold at `warn`.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use league_types::{Goal, Match, MatchId, Player, PlayerId, RosterEntry, TopScorer};

use crate::liveness::{Live, MatchBound, Sided};

/// Size of the per-team scorer leaderboard.
pub const TOP_SCORERS_LIMIT: usize = 10;

/// Live matches keyed by identifier, for joining rows to their parent.
pub type MatchIndex<'a> = HashMap<MatchId, &'a Match>;

/// Index matches by identifier.
pub fn index_matches(matches: &[Match]) -> MatchIndex<'_> {
    matches.iter().map(|m| (m.id, m)).collect()
}

/// Count goals per scorer. Players with no goals are simply absent.
pub fn goals_by_player(goals: &Live<'_, Goal>) -> HashMap<PlayerId, u32> {
    let mut counts: HashMap<PlayerId, u32> = HashMap::new();
    let mut skipped = 0_usize;
    for goal in goals.iter() {
        match goal.player_ref() {
            Some(player) => {
                let count = counts.entry(player).or_insert(0);
                *count = count.saturating_add(1);
            }
            None => skipped = skipped.saturating_add(1),
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "Skipped goals without a scorer");
    }
    counts
}

/// Count distinct matches per player from roster entries.
///
/// Duplicate entries for the same (match, player) count once.
pub fn matches_by_player(roster: &Live<'_, RosterEntry>) -> HashMap<PlayerId, u32> {
    let mut seen: HashMap<PlayerId, HashSet<MatchId>> = HashMap::new();
    let mut skipped = 0_usize;
    for entry in roster.iter() {
        match (entry.player_ref(), entry.match_ref()) {
            (Some(player), Some(match_id)) => {
                seen.entry(player).or_default().insert(match_id);
            }
            _ => skipped = skipped.saturating_add(1),
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "Skipped roster entries without a player");
    }
    seen.into_iter()
        .map(|(player, matches)| (player, saturating_u32(matches.len())))
        .collect()
}

/// Rows credited to `team`: the row's side must be the side `team`
/// played on in the parent match.
///
/// Goals and roster entries carry only a home/away indicator, so the team
/// is recovered through the parent match. Rows with no side, or whose
/// match is not in `index`, are not credited to anyone.
pub fn credited_to_team<'a, T: Sided>(
    rows: &Live<'a, T>,
    index: &MatchIndex<'_>,
    team: &str,
) -> Live<'a, T> {
    rows.retain(|row| {
        let (Some(match_id), Some(side)) = (row.match_ref(), row.side()) else {
            return false;
        };
        index
            .get(&match_id)
            .is_some_and(|m| m.team_for(side) == team)
    })
}

/// Number of matches with `team` on either side.
pub fn matches_involving(matches: &[Match], team: &str) -> u32 {
    saturating_u32(matches.iter().filter(|m| m.involves(team)).count())
}

/// First and last name joined by a single space.
pub(crate) fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
}

/// Sort rows leaderboard-style: count descending, then full name
/// ascending without regard to case, then identifier for stability.
///
/// `key` yields `(count, first_name, last_name, id)` for a row.
pub fn sort_leaderboard<T>(rows: &mut [T], key: impl Fn(&T) -> (u32, &str, &str, PlayerId)) {
    rows.sort_by_cached_key(|row| {
        let (count, first_name, last_name, id) = key(row);
        (Reverse(count), full_name(first_name, last_name).to_lowercase(), id)
    });
}

/// Build a top-scorer leaderboard from per-player goal counts.
///
/// Zero counts are excluded. Scorers whose player record is gone are
/// skipped, since they can be neither named nor ordered by name.
pub fn top_scorers(
    counts: &HashMap<PlayerId, u32>,
    players: &HashMap<PlayerId, &Player>,
    limit: usize,
) -> Vec<TopScorer> {
    let mut board: Vec<TopScorer> = counts
        .iter()
        .filter(|(_, goals)| **goals > 0)
        .filter_map(|(id, goals)| {
            players.get(id).map(|p| TopScorer {
                player_id: *id,
                first_name: p.first_name.clone(),
                last_name: p.last_name.clone(),
                goals: *goals,
            })
        })
        .collect();
    sort_leaderboard(&mut board, |s| {
        (s.goals, s.first_name.as_str(), s.last_name.as_str(), s.player_id)
    });
    board.truncate(limit);
    board
}

/// Convert a collection size to `u32`, saturating on overflow.
pub(crate) fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::NaiveDate;
    use league_types::{GoalId, RosterEntryId, SkillAttributes, TeamSide};

    use super::*;
    use crate::liveness::{LiveMatchSet, filter_live};

    fn fixture(id: i64, home: &str, away: &str) -> Match {
        Match {
            id: MatchId(id),
            home_team: home.to_owned(),
            away_team: away.to_owned(),
            home_score: 0,
            away_score: 0,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    fn goal(id: i64, match_id: i64, player: Option<i64>, side: TeamSide) -> Goal {
        Goal {
            id: GoalId(id),
            match_id: Some(MatchId(match_id)),
            player_id: player.map(PlayerId),
            team_type: Some(side),
            minute: None,
        }
    }

    fn entry(id: i64, match_id: i64, player: i64, side: TeamSide) -> RosterEntry {
        RosterEntry {
            id: RosterEntryId(id),
            match_id: Some(MatchId(match_id)),
            player_id: Some(PlayerId(player)),
            team_type: Some(side),
        }
    }

    fn player(id: i64, first: &str, last: &str) -> Player {
        Player {
            id: PlayerId(id),
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            team: None,
            position: None,
            skills: SkillAttributes::default(),
            injured: None,
            rating_bonus: None,
        }
    }

    #[test]
    fn each_goal_row_counts_once() {
        let matches = vec![fixture(1, "A", "B")];
        let goals = vec![
            goal(1, 1, Some(10), TeamSide::Home),
            goal(2, 1, Some(10), TeamSide::Home),
            goal(3, 1, Some(11), TeamSide::Away),
            goal(4, 1, None, TeamSide::Away),
        ];
        let live = LiveMatchSet::from_matches(&matches);

        let counts = goals_by_player(&filter_live(&goals, &live));

        assert_eq!(counts[&PlayerId(10)], 2);
        assert_eq!(counts[&PlayerId(11)], 1);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn deleting_a_match_never_increases_goal_counts() {
        let matches = vec![fixture(1, "A", "B"), fixture(2, "A", "C")];
        let goals = vec![
            goal(1, 1, Some(10), TeamSide::Home),
            goal(2, 2, Some(10), TeamSide::Home),
            goal(3, 2, Some(11), TeamSide::Away),
        ];
        let before = goals_by_player(&filter_live(&goals, &LiveMatchSet::from_matches(&matches)));
        let after = goals_by_player(&filter_live(
            &goals,
            &LiveMatchSet::from_matches(&matches[..1]),
        ));

        for (player, count) in &after {
            assert!(count <= before.get(player).unwrap_or(&0));
        }
        assert_eq!(after.get(&PlayerId(11)), None);
        assert_eq!(after[&PlayerId(10)], 1);
    }

    #[test]
    fn duplicate_roster_entries_count_one_match() {
        let matches = vec![fixture(1, "A", "B"), fixture(2, "A", "B")];
        let roster = vec![
            entry(1, 1, 10, TeamSide::Home),
            entry(2, 1, 10, TeamSide::Home),
            entry(3, 2, 10, TeamSide::Home),
            RosterEntry {
                player_id: None,
                ..entry(4, 2, 10, TeamSide::Home)
            },
        ];
        let live = LiveMatchSet::from_matches(&matches);

        let played = matches_by_player(&filter_live(&roster, &live));
        assert_eq!(played[&PlayerId(10)], 2);
        assert_eq!(played.len(), 1);

        let single = vec![entry(1, 1, 10, TeamSide::Home), entry(3, 2, 10, TeamSide::Home)];
        let played_single = matches_by_player(&filter_live(&single, &live));
        assert_eq!(played, played_single);
    }

    #[test]
    fn team_credit_follows_side_in_parent_match() {
        // Murinjo is home in match 1 and away in match 2.
        let matches = vec![fixture(1, "Murinjo", "Zeleni"), fixture(2, "Zeleni", "Murinjo")];
        let goals = vec![
            goal(1, 1, Some(10), TeamSide::Home),
            goal(2, 1, Some(20), TeamSide::Away),
            goal(3, 2, Some(10), TeamSide::Away),
            goal(4, 2, Some(20), TeamSide::Home),
            Goal {
                team_type: None,
                ..goal(5, 1, Some(10), TeamSide::Home)
            },
        ];
        let live = LiveMatchSet::from_matches(&matches);
        let index = index_matches(&matches);

        let credited = credited_to_team(&filter_live(&goals, &live), &index, "Murinjo");
        let counts = goals_by_player(&credited);

        assert_eq!(counts[&PlayerId(10)], 2);
        assert_eq!(counts.get(&PlayerId(20)), None);
    }

    #[test]
    fn leaderboard_breaks_ties_by_name() {
        let players = [player(1, "Baka", "Zoran"), player(2, "Abra", "Kadabra"), player(3, "ceca", "Top")];
        let lookup: HashMap<PlayerId, &Player> = players.iter().map(|p| (p.id, p)).collect();
        let counts: HashMap<PlayerId, u32> =
            [(PlayerId(1), 2), (PlayerId(2), 2), (PlayerId(3), 5)].into_iter().collect();

        let board = top_scorers(&counts, &lookup, TOP_SCORERS_LIMIT);

        let order: Vec<i64> = board.iter().map(|s| s.player_id.0).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    fn leaderboard_name_order_ignores_case() {
        let players = [player(1, "bob", "B"), player(2, "Alice", "A"), player(3, "alan", "Z")];
        let lookup: HashMap<PlayerId, &Player> = players.iter().map(|p| (p.id, p)).collect();
        let counts: HashMap<PlayerId, u32> =
            [(PlayerId(1), 1), (PlayerId(2), 1), (PlayerId(3), 1)].into_iter().collect();

        let board = top_scorers(&counts, &lookup, TOP_SCORERS_LIMIT);

        let order: Vec<i64> = board.iter().map(|s| s.player_id.0).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    fn top_scorers_excludes_zero_and_unknown_and_truncates() {
        let players: Vec<Player> = (1..=12).map(|i| player(i, "P", &format!("{i:02}"))).collect();
        let lookup: HashMap<PlayerId, &Player> = players.iter().map(|p| (p.id, p)).collect();
        let mut counts: HashMap<PlayerId, u32> = (1..=12).map(|i| (PlayerId(i), 1)).collect();
        counts.insert(PlayerId(5), 0);
        counts.insert(PlayerId(99), 7);

        let board = top_scorers(&counts, &lookup, TOP_SCORERS_LIMIT);

        assert_eq!(board.len(), TOP_SCORERS_LIMIT);
        assert!(board.iter().all(|s| s.goals > 0));
        assert!(board.iter().all(|s| s.player_id != PlayerId(5)));
        assert!(board.iter().all(|s| s.player_id != PlayerId(99)));
    }

    #[test]
    fn full_name_joins_with_one_space() {
        assert_eq!(full_name("Abra", "Kadabra"), "Abra Kadabra");
    }

    #[test]
    fn matches_involving_counts_both_sides() {
        let matches = vec![
            fixture(1, "Murinjo", "Zeleni"),
            fixture(2, "Zeleni", "Murinjo"),
            fixture(3, "Zeleni", "Plavi"),
        ];
        assert_eq!(matches_involving(&matches, "Murinjo"), 2);
        assert_eq!(matches_involving(&matches, "murinjo"), 0);
    }
}
