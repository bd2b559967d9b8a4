//! Administrative operations: league setup, result recording (which triggers
//! settlement), bracket resolution, and bonus points.

use crate::logic::bracket_settlement::{
    resolve_champion, resolve_final_slot, resolve_quarter_slot, resolve_semi_slot, settle_knockout,
};
use crate::logic::match_settlement::settle_match;
use crate::logic::ranking::{recompute_all_rankings, recompute_ranking};
use crate::logic::scorer_settlement::settle_scorers;
use crate::models::{
    BracketPair, League, LeagueError, Match, MatchId, Phase, Player, PlayerId, Profile, Team,
    TeamId, UserId,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Add a team. Names are unique, case-insensitive.
pub fn add_team(
    league: &mut League,
    name: &str,
    short_name: &str,
    flag_url: Option<String>,
    now: DateTime<Utc>,
) -> Result<TeamId, LeagueError> {
    let name = name.trim();
    if league
        .teams
        .iter()
        .any(|t| t.name.eq_ignore_ascii_case(name))
    {
        return Err(LeagueError::DuplicateTeamName);
    }
    let team = Team::new(name, short_name.trim(), flag_url, now);
    let id = team.id;
    league.teams.push(team);
    Ok(id)
}

/// One row of the team-import CSV: `name,short_name[,flag_url]`.
#[derive(Debug, Deserialize)]
struct TeamRecord {
    name: String,
    short_name: String,
    flag_url: Option<String>,
}

/// Bulk-import teams from CSV with a `name,short_name,flag_url` header.
/// Returns the number of teams added. Fails on the first bad row or duplicate
/// name without rolling back earlier rows (re-running skips none, errors on
/// the duplicate instead).
pub fn import_teams_csv(
    league: &mut League,
    data: &str,
    now: DateTime<Utc>,
) -> Result<usize, LeagueError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());
    let mut added = 0;
    for record in reader.deserialize::<TeamRecord>() {
        let record = record.map_err(|e| LeagueError::InvalidCsv(e.to_string()))?;
        let flag_url = record.flag_url.filter(|u| !u.is_empty());
        add_team(league, &record.name, &record.short_name, flag_url, now)?;
        added += 1;
    }
    Ok(added)
}

/// Add a top-scorer candidate to a team's squad.
pub fn add_player(
    league: &mut League,
    name: &str,
    team_id: TeamId,
    now: DateTime<Utc>,
) -> Result<PlayerId, LeagueError> {
    league.team(team_id)?;
    let player = Player::new(name.trim(), team_id, now);
    let id = player.id;
    league.players.push(player);
    Ok(id)
}

/// Set a player's tournament goal total (an absolute count, not a delta).
/// Rejected once the scorer standings have been marked final.
pub fn record_goals(league: &mut League, player_id: PlayerId, goals: u32) -> Result<(), LeagueError> {
    if league.settings.scorers_final {
        return Err(LeagueError::ScorersFinal);
    }
    league.player_mut(player_id)?.goals = goals;
    Ok(())
}

/// Register a league member.
pub fn add_profile(
    league: &mut League,
    username: &str,
    is_admin: bool,
    now: DateTime<Utc>,
) -> Result<UserId, LeagueError> {
    let profile = Profile::new(username.trim(), is_admin, now);
    let id = profile.id;
    league.profiles.push(profile);
    // New members appear on the leaderboard immediately, with zero points.
    recompute_ranking(league, id, now)?;
    Ok(id)
}

/// Create a match. Group-stage matches need a group number 1-6; knockout
/// matches must not carry one.
#[allow(clippy::too_many_arguments)]
pub fn create_match(
    league: &mut League,
    phase: Phase,
    group_number: Option<u8>,
    team_a: TeamId,
    team_b: TeamId,
    bet_deadline: DateTime<Utc>,
    points: Option<(u32, u32)>,
    now: DateTime<Utc>,
) -> Result<MatchId, LeagueError> {
    league.team(team_a)?;
    league.team(team_b)?;
    if team_a == team_b {
        return Err(LeagueError::SameTeam);
    }
    match (phase, group_number) {
        (Phase::Group, Some(n)) if (1..=6).contains(&n) => {}
        (Phase::Group, _) => return Err(LeagueError::InvalidGroupNumber),
        (_, Some(_)) => return Err(LeagueError::InvalidGroupNumber),
        (_, None) => {}
    }
    let mut m = Match::new(phase, group_number, team_a, team_b, bet_deadline, now);
    if let Some((exact, winner)) = points {
        m.points_for_exact = exact;
        m.points_for_winner = winner;
    }
    let id = m.id;
    league.matches.push(m);
    Ok(id)
}

/// Record a match's final score and settle it.
///
/// Setting the score, flipping `finished`, settling the bets and
/// re-aggregating rankings happen as one transition on the league state. The
/// `finished` check is the guard against double settlement: a second call for
/// the same match is rejected rather than awarding points twice.
pub fn record_result(
    league: &mut League,
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
    now: DateTime<Utc>,
) -> Result<(), LeagueError> {
    let m = league.match_mut(match_id)?;
    if m.finished {
        return Err(LeagueError::MatchAlreadyFinished(match_id));
    }
    m.score = Some((score_a, score_b));
    m.finished = true;

    settle_match(league, match_id)?;
    recompute_all_rankings(league, now)?;
    log::info!("Match {} settled at {}-{}", match_id, score_a, score_b);
    Ok(())
}

/// Set the round-of-16 pairings. Rejected once any later slot is resolved,
/// since resolved slots were validated against these pairings.
pub fn set_ko_round_of_16(
    league: &mut League,
    pairs: [BracketPair; 8],
) -> Result<(), LeagueError> {
    if league.ko_tree.has_resolutions() {
        return Err(LeagueError::BracketAlreadyStarted);
    }
    for pair in &pairs {
        for team in [pair.team_a, pair.team_b].into_iter().flatten() {
            league.team(team)?;
        }
    }
    league.ko_tree.round_of_16 = pairs;
    Ok(())
}

/// Which knockout round a resolved slot belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KoRound {
    Quarter,
    Semi,
    Final,
    Champion,
}

/// Record an actual bracket outcome and re-score all knockout bets against
/// the new snapshot. Safe to re-invoke with the same outcome.
pub fn resolve_ko_slot(
    league: &mut League,
    round: KoRound,
    index: usize,
    team: TeamId,
    now: DateTime<Utc>,
) -> Result<(), LeagueError> {
    league.team(team)?;
    match round {
        KoRound::Quarter => resolve_quarter_slot(league, index, team)?,
        KoRound::Semi => resolve_semi_slot(league, index, team)?,
        KoRound::Final => resolve_final_slot(league, index, team)?,
        KoRound::Champion => resolve_champion(league, team)?,
    }
    settle_knockout(league);
    recompute_all_rankings(league, now)?;
    Ok(())
}

/// Mark the scorer standings final (one-way) so scorer settlement can run.
pub fn mark_scorers_final(league: &mut League) {
    league.settings.scorers_final = true;
}

/// Run scorer settlement and fold the results into the rankings.
pub fn run_scorer_settlement(league: &mut League, now: DateTime<Utc>) -> Result<(), LeagueError> {
    settle_scorers(league)?;
    recompute_all_rankings(league, now)?;
    Ok(())
}

/// Set a user's admin-assigned bonus points and refresh their ranking row.
pub fn set_bonus_points(
    league: &mut League,
    user_id: UserId,
    points: u32,
    now: DateTime<Utc>,
) -> Result<(), LeagueError> {
    league.profile(user_id)?;
    match league.rankings.iter_mut().find(|r| r.user_id == user_id) {
        Some(row) => row.bonus_points = points,
        None => {
            recompute_ranking(league, user_id, now)?;
            if let Some(row) = league.rankings.iter_mut().find(|r| r.user_id == user_id) {
                row.bonus_points = points;
            }
        }
    }
    recompute_ranking(league, user_id, now)
}
