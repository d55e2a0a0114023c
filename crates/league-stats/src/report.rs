//! Report assembly: the externally visible shapes.
//!
//! Each function is a pure fold over a [`Snapshot`]; the store is never
//! consulted here.

use std::cmp::Reverse;

use league_types::{
    GoalDetail, MatchId, MatchRatings, MatchSummary, PlayerDetail, PlayerId, PlayerStatsRow,
    RosterPlayer, Team, TeamDetail,
};

use crate::aggregate::{
    TOP_SCORERS_LIMIT, credited_to_team, goals_by_player, matches_by_player, matches_involving,
    sort_leaderboard, top_scorers,
};
use crate::rating::{average_by_player, overall_rating, unrated};
use crate::store::Snapshot;

/// The league-wide table: every player in the snapshot, most goals first.
pub fn stats_table(snapshot: &Snapshot) -> Vec<PlayerStatsRow> {
    let goals = goals_by_player(&snapshot.live_goals());
    let played = matches_by_player(&snapshot.live_roster());
    let ratings = average_by_player(&snapshot.live_ratings());

    let mut rows: Vec<PlayerStatsRow> = snapshot
        .players
        .iter()
        .map(|p| {
            let rating = ratings.get(&p.id).copied().unwrap_or_else(unrated);
            PlayerStatsRow {
                id: p.id,
                first_name: p.first_name.clone(),
                last_name: p.last_name.clone(),
                team: p.team.clone(),
                goals: goals.get(&p.id).copied().unwrap_or(0),
                matches_played: played.get(&p.id).copied().unwrap_or(0),
                average_rating: rating.average,
                rating_count: rating.count,
                overall_rating: overall_rating(p),
            }
        })
        .collect();

    sort_leaderboard(&mut rows, |r| {
        (r.goals, r.first_name.as_str(), r.last_name.as_str(), r.id)
    });
    rows
}

/// One player's page, or `None` when the snapshot holds no such player.
///
/// Goals whose match has been deleted are dropped entirely, not listed
/// without a match.
pub fn player_detail(id: PlayerId, snapshot: &Snapshot) -> Option<PlayerDetail> {
    let player = snapshot.players.iter().find(|p| p.id == id)?.clone();
    let mine = |row: Option<PlayerId>| row == Some(id);

    let goals = snapshot.live_goals().retain(|g| mine(g.player_id));
    let roster = snapshot.live_roster().retain(|e| mine(e.player_id));
    let ratings = snapshot.live_ratings().retain(|r| mine(r.player_id));
    let index = snapshot.match_index();

    let mut goals_details: Vec<GoalDetail> = goals
        .iter()
        .filter_map(|g| {
            let parent = index.get(&g.match_id?)?;
            Some(GoalDetail {
                goal_minute: g.minute,
                team_type: g.team_type,
                match_info: MatchSummary::from(*parent),
            })
        })
        .collect();
    goals_details.sort_by_key(|d| {
        (
            Reverse(d.match_info.date),
            Reverse(d.match_info.id),
            Reverse(d.goal_minute),
        )
    });

    let rating = average_by_player(&ratings)
        .remove(&id)
        .unwrap_or_else(unrated);

    Some(PlayerDetail {
        goals: goals_by_player(&goals).get(&id).copied().unwrap_or(0),
        matches_played: matches_by_player(&roster).get(&id).copied().unwrap_or(0),
        average_rating: rating.average,
        rating_count: rating.count,
        overall_rating: overall_rating(&player),
        goals_details,
        player,
    })
}

/// One team's page.
///
/// The roster is the snapshot's players whose `team` field equals the
/// team name exactly. Goals and appearances count only when the row's
/// side is the side the team played in that match. Scorers who have since
/// left the team are named from the rest of the snapshot's players.
pub fn team_detail(team: Team, snapshot: &Snapshot) -> TeamDetail {
    let index = snapshot.match_index();
    let goals = credited_to_team(&snapshot.live_goals(), &index, &team.name);
    let roster = credited_to_team(&snapshot.live_roster(), &index, &team.name);
    let goal_counts = goals_by_player(&goals);
    let played = matches_by_player(&roster);

    let mut players: Vec<RosterPlayer> = snapshot
        .players
        .iter()
        .filter(|p| p.plays_for(&team.name))
        .map(|p| RosterPlayer {
            id: p.id,
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            position: p.position.clone(),
            injured: p.injured,
            goals: goal_counts.get(&p.id).copied().unwrap_or(0),
            matches_played: played.get(&p.id).copied().unwrap_or(0),
            overall_rating: overall_rating(p),
        })
        .collect();
    sort_leaderboard(&mut players, |p| {
        (p.goals, p.first_name.as_str(), p.last_name.as_str(), p.id)
    });

    TeamDetail {
        top_scorers: top_scorers(&goal_counts, &snapshot.player_index(), TOP_SCORERS_LIMIT),
        matches_count: matches_involving(&snapshot.matches, &team.name),
        players,
        team,
    }
}

/// Average rating per player for one match. A deleted match yields an
/// empty map.
pub fn match_ratings(match_id: MatchId, snapshot: &Snapshot) -> MatchRatings {
    let ratings = snapshot
        .live_ratings()
        .retain(|r| r.match_id == Some(match_id));
    average_by_player(&ratings).into_iter().collect()
}
