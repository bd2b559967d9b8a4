//! Match settlement: convert a finished match's score into per-bet points.

use crate::models::{League, LeagueError, MatchId};
use std::cmp::Ordering;

/// Settle every bet on a finished match.
///
/// Exact score line earns `points_for_exact`; matching only the outcome
/// direction (home win / draw / away win) earns `points_for_winner`;
/// anything else earns 0. The computation is a pure function of stored state,
/// so re-running on an already-settled match rewrites identical values.
pub fn settle_match(league: &mut League, match_id: MatchId) -> Result<(), LeagueError> {
    let m = league.match_by_id(match_id)?;
    if !m.finished {
        return Err(LeagueError::MatchNotFinished(match_id));
    }
    let actual = m.score.ok_or(LeagueError::MatchNotFinished(match_id))?;
    let (exact, winner) = (m.points_for_exact, m.points_for_winner);

    for bet in league.bets.iter_mut().filter(|b| b.match_id == match_id) {
        bet.points_awarded = Some(score_bet(bet.predicted, actual, exact, winner));
    }
    Ok(())
}

/// Points for one bet given the actual score.
pub fn score_bet(predicted: (u32, u32), actual: (u32, u32), exact: u32, winner: u32) -> u32 {
    if predicted == actual {
        exact
    } else if outcome(predicted) == outcome(actual) {
        winner
    } else {
        0
    }
}

/// Outcome direction of a score line. A draw is its own direction.
fn outcome((a, b): (u32, u32)) -> Ordering {
    a.cmp(&b)
}
