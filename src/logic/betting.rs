//! User bet writes: score bets, knockout bets, scorer bets, with deadline
//! locks and one-row-per-user upserts.

use crate::models::{
    Bet, KoBet, KoPredictions, KoTree, League, LeagueError, MatchId, PlayerId, ScorerBet, TeamId,
    UserId,
};
use chrono::{DateTime, Utc};

/// Place or update a user's bet on a match (one bet per user per match).
/// Rejected once the betting deadline has passed or the match is finished.
pub fn place_bet(
    league: &mut League,
    user_id: UserId,
    match_id: MatchId,
    predicted: (u32, u32),
    now: DateTime<Utc>,
) -> Result<(), LeagueError> {
    league.profile(user_id)?;
    let m = league.match_by_id(match_id)?;
    if m.finished || now >= m.bet_deadline {
        return Err(LeagueError::BettingClosed(match_id));
    }

    match league
        .bets
        .iter_mut()
        .find(|b| b.user_id == user_id && b.match_id == match_id)
    {
        Some(bet) => {
            bet.predicted = predicted;
            bet.updated_at = now;
        }
        None => league.bets.push(Bet::new(user_id, match_id, predicted, now)),
    }
    Ok(())
}

/// Place or update a user's knockout bet (one per user).
///
/// Every filled slot must be reachable from the user's own upstream picks;
/// rejected once the league's knockout lock deadline has passed.
pub fn place_ko_bet(
    league: &mut League,
    user_id: UserId,
    predictions: KoPredictions,
    now: DateTime<Utc>,
) -> Result<(), LeagueError> {
    league.profile(user_id)?;
    check_ko_lock(league, now)?;
    validate_predictions(&predictions, &league.ko_tree)?;

    match league.ko_bets.iter_mut().find(|b| b.user_id == user_id) {
        Some(bet) => {
            bet.predictions = predictions;
            bet.updated_at = now;
        }
        None => league.ko_bets.push(KoBet::new(user_id, predictions, now)),
    }
    Ok(())
}

/// Place or update a user's top-scorer pick (one per user). Locked together
/// with the knockout bet, and once the scorer standings are final.
pub fn place_scorer_bet(
    league: &mut League,
    user_id: UserId,
    player_id: PlayerId,
    now: DateTime<Utc>,
) -> Result<(), LeagueError> {
    league.profile(user_id)?;
    league.player(player_id)?;
    if league.settings.scorers_final {
        return Err(LeagueError::PredictionsLocked);
    }
    check_ko_lock(league, now)?;

    match league.scorer_bets.iter_mut().find(|b| b.user_id == user_id) {
        Some(bet) => {
            bet.player_id = player_id;
            bet.updated_at = now;
        }
        None => league.scorer_bets.push(ScorerBet::new(user_id, player_id, now)),
    }
    Ok(())
}

fn check_ko_lock(league: &League, now: DateTime<Utc>) -> Result<(), LeagueError> {
    if let Some(deadline) = league.settings.ko_lock_deadline {
        if now >= deadline {
            return Err(LeagueError::PredictionsLocked);
        }
    }
    Ok(())
}

/// A slot may only hold a team reachable from the user's own upstream picks:
/// quarter slot `i` from R16 pairing `i`, semi slot `i` from the user's
/// quarter slots `2i`/`2i+1`, and so on up to the champion.
fn validate_predictions(predictions: &KoPredictions, tree: &KoTree) -> Result<(), LeagueError> {
    for (i, pick) in predictions.quarter.iter().enumerate() {
        if let Some(team) = *pick {
            let pair = &tree.round_of_16[i];
            if pair.team_a != Some(team) && pair.team_b != Some(team) {
                return Err(LeagueError::UnreachablePick(team));
            }
        }
    }
    check_round(&predictions.semi, &predictions.quarter)?;
    check_round(&predictions.final_slots, &predictions.semi)?;
    if let Some(team) = predictions.champion {
        check_pick(team, &predictions.final_slots, 0)?;
    }
    Ok(())
}

fn check_round(round: &[Option<TeamId>], upstream: &[Option<TeamId>]) -> Result<(), LeagueError> {
    for (i, pick) in round.iter().enumerate() {
        if let Some(team) = *pick {
            check_pick(team, upstream, i)?;
        }
    }
    Ok(())
}

fn check_pick(team: TeamId, upstream: &[Option<TeamId>], index: usize) -> Result<(), LeagueError> {
    let feeders = &upstream[2 * index..2 * index + 2];
    if feeders[0] != Some(team) && feeders[1] != Some(team) {
        return Err(LeagueError::UnreachablePick(team));
    }
    Ok(())
}
