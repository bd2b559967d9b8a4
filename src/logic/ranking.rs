//! Ranking aggregation: fold settled points into one row per user.

use crate::models::{League, LeagueError, Ranking, UserId};
use chrono::{DateTime, Utc};

/// Recompute one user's ranking row from their settled bets.
///
/// `bonus_points` is carried over from the existing row (it is admin-assigned,
/// never derived). Idempotent, and independent of other users' rows, so
/// aggregation order across users does not matter.
pub fn recompute_ranking(
    league: &mut League,
    user_id: UserId,
    now: DateTime<Utc>,
) -> Result<(), LeagueError> {
    league.profile(user_id)?;

    let match_points: u32 = league
        .bets
        .iter()
        .filter(|b| b.user_id == user_id)
        .filter_map(|b| b.points_awarded)
        .sum();
    let scorer_points = league
        .scorer_bet(user_id)
        .and_then(|b| b.points_awarded)
        .unwrap_or(0);
    let ko_points = league
        .ko_bet(user_id)
        .and_then(|b| b.points_awarded)
        .unwrap_or(0);

    let row = match league.rankings.iter_mut().find(|r| r.user_id == user_id) {
        Some(row) => row,
        None => {
            league.rankings.push(Ranking::new(user_id, now));
            league.rankings.last_mut().unwrap()
        }
    };
    row.match_points = match_points;
    row.scorer_points = scorer_points;
    row.ko_points = ko_points;
    row.total_points = match_points + scorer_points + ko_points + row.bonus_points;
    row.updated_at = now;
    Ok(())
}

/// Recompute rankings for every profiled user.
pub fn recompute_all_rankings(league: &mut League, now: DateTime<Utc>) -> Result<(), LeagueError> {
    let user_ids: Vec<UserId> = league.profiles.iter().map(|p| p.id).collect();
    for user_id in user_ids {
        recompute_ranking(league, user_id, now)?;
    }
    Ok(())
}

/// Ranking rows sorted for display: total points descending, ties broken by
/// earliest profile creation. Pure read; rows without a profile sort last.
pub fn leaderboard(league: &League) -> Vec<Ranking> {
    let mut rows = league.rankings.clone();
    rows.sort_by_key(|r| {
        let joined = league
            .profile(r.user_id)
            .map(|p| p.created_at)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        (std::cmp::Reverse(r.total_points), joined)
    });
    rows
}
