//! Bracket settlement: resolve the ground-truth tree round by round and score
//! knockout bets against the current snapshot.

use crate::models::{KoPredictions, KoRoundWeights, KoTree, League, LeagueError, TeamId};

/// Record the actual winner of round-of-16 pairing `index` (the team
/// advancing to the quarter-finals).
///
/// The pairing must have both teams set, and `team` must be one of them.
/// Re-resolving with the same team is a no-op; a different team is rejected.
pub fn resolve_quarter_slot(
    league: &mut League,
    index: usize,
    team: TeamId,
) -> Result<(), LeagueError> {
    check_index(index, league.ko_tree.quarter.len())?;
    let (a, b) = league.ko_tree.quarter_feeders(index);
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(LeagueError::UnresolvedPrerequisite),
    };
    if team != a && team != b {
        return Err(LeagueError::UnreachablePick(team));
    }
    set_slot(&mut league.ko_tree.quarter[index], team)
}

/// Record the actual winner of semi-final slot `index`, fed by quarter slots
/// `2*index` and `2*index + 1`.
pub fn resolve_semi_slot(league: &mut League, index: usize, team: TeamId) -> Result<(), LeagueError> {
    check_index(index, league.ko_tree.semi.len())?;
    let feeders = [
        league.ko_tree.quarter[2 * index],
        league.ko_tree.quarter[2 * index + 1],
    ];
    check_feeders(&feeders, team)?;
    set_slot(&mut league.ko_tree.semi[index], team)
}

/// Record an actual finalist (final slot `index`), fed by semi slots
/// `2*index` and `2*index + 1`.
pub fn resolve_final_slot(league: &mut League, index: usize, team: TeamId) -> Result<(), LeagueError> {
    check_index(index, league.ko_tree.final_slots.len())?;
    let feeders = [
        league.ko_tree.semi[2 * index],
        league.ko_tree.semi[2 * index + 1],
    ];
    check_feeders(&feeders, team)?;
    set_slot(&mut league.ko_tree.final_slots[index], team)
}

/// Record the actual champion, fed by the two final slots.
pub fn resolve_champion(league: &mut League, team: TeamId) -> Result<(), LeagueError> {
    let feeders = league.ko_tree.final_slots;
    check_feeders(&feeders, team)?;
    set_slot(&mut league.ko_tree.champion, team)
}

/// Score every knockout bet against the tree's current resolution snapshot.
///
/// A slot whose actual outcome is unknown contributes nothing, and the whole
/// total is recomputed from scratch on each run, so an unknown slot is never
/// frozen at zero: once it resolves, the next run picks it up. A resolved slot
/// that differs from the prediction (including picks of teams eliminated
/// upstream) is simply a miss.
pub fn settle_knockout(league: &mut League) {
    let tree = league.ko_tree.clone();
    let weights = league.settings.ko_round_weights;
    for bet in league.ko_bets.iter_mut() {
        bet.points_awarded = Some(score_predictions(&bet.predictions, &tree, weights));
    }
}

/// Points one prediction set earns against the tree snapshot.
pub fn score_predictions(predictions: &KoPredictions, tree: &KoTree, w: KoRoundWeights) -> u32 {
    let mut points = 0;
    points += score_round(&predictions.quarter, &tree.quarter, w.quarter);
    points += score_round(&predictions.semi, &tree.semi, w.semi);
    points += score_round(&predictions.final_slots, &tree.final_slots, w.final_round);
    if let (Some(predicted), Some(actual)) = (predictions.champion, tree.champion) {
        if predicted == actual {
            points += w.champion;
        }
    }
    points
}

/// Per-slot comparison for one round. Slots with an unknown actual outcome
/// contribute zero without being treated as wrong.
fn score_round(predicted: &[Option<TeamId>], actual: &[Option<TeamId>], weight: u32) -> u32 {
    predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| matches!((p, a), (Some(p), Some(a)) if p == a))
        .count() as u32
        * weight
}

fn check_index(index: usize, len: usize) -> Result<(), LeagueError> {
    if index >= len {
        return Err(LeagueError::SlotIndexOutOfRange { index, len });
    }
    Ok(())
}

/// Both feeding slots must be resolved and `team` must be one of them.
fn check_feeders(feeders: &[Option<TeamId>; 2], team: TeamId) -> Result<(), LeagueError> {
    let (a, b) = match (feeders[0], feeders[1]) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(LeagueError::UnresolvedPrerequisite),
    };
    if team != a && team != b {
        return Err(LeagueError::UnreachablePick(team));
    }
    Ok(())
}

fn set_slot(slot: &mut Option<TeamId>, team: TeamId) -> Result<(), LeagueError> {
    match *slot {
        Some(existing) if existing == team => Ok(()),
        Some(_) => Err(LeagueError::SlotAlreadyResolved),
        None => {
            *slot = Some(team);
            Ok(())
        }
    }
}
