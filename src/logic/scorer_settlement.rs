//! Scorer settlement: score top-scorer picks against final goal standings.

use crate::models::{League, LeagueError};
use std::collections::HashMap;

/// Settle every scorer bet against the final goal standings.
///
/// Requires the admin to have marked the standings final, and at least one
/// goal to have been scored. All players tied at the maximum goal count are
/// top scorers; a pick matching any of them earns the full `exact` points.
/// With `top_n` configured, a pick ranked within the top N (competition
/// ranking, ties share a rank) earns the partial points instead. Recomputes
/// every bet from scratch, so re-running is safe.
pub fn settle_scorers(league: &mut League) -> Result<(), LeagueError> {
    if !league.settings.scorers_final {
        return Err(LeagueError::ScorersNotFinal);
    }
    let max_goals = league.players.iter().map(|p| p.goals).max().unwrap_or(0);
    if max_goals == 0 {
        return Err(LeagueError::NoGoalsScored);
    }
    let scoring = league.settings.scorer_scoring;

    // Points per player, computed up front so the bet pass can stay simple.
    let mut points_by_player: HashMap<_, u32> = HashMap::new();
    for p in &league.players {
        let points = if p.goals == max_goals {
            scoring.exact
        } else if let Some(top_n) = scoring.top_n {
            // Competition ranking: rank = 1 + number of players strictly ahead.
            let rank = 1 + league.players.iter().filter(|q| q.goals > p.goals).count();
            if p.goals > 0 && rank <= top_n.n {
                top_n.points
            } else {
                0
            }
        } else {
            0
        };
        points_by_player.insert(p.id, points);
    }

    for bet in league.scorer_bets.iter_mut() {
        let points = points_by_player
            .get(&bet.player_id)
            .copied()
            .ok_or(LeagueError::UnknownPlayer(bet.player_id))?;
        bet.points_awarded = Some(points);
    }
    Ok(())
}
