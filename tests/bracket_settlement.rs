//! Integration tests for bracket resolution and knockout-bet settlement.

use chrono::{DateTime, TimeZone, Utc};
use liga_typerow::{
    add_profile, add_team, place_ko_bet, resolve_ko_slot, settle_knockout, BracketPair, KoBet,
    KoPredictions, KoRound, League, LeagueError, TeamId, UserId,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

/// League with 16 teams wired into the round of 16 (pair i = teams 2i vs 2i+1)
/// and one user.
fn league_with_bracket() -> (League, Vec<TeamId>, UserId) {
    let mut l = League::new();
    let now = t0();
    let teams: Vec<TeamId> = (0..16)
        .map(|i| add_team(&mut l, &format!("Team {i}"), &format!("T{i:02}"), None, now).unwrap())
        .collect();
    let mut pairs = [BracketPair::default(); 8];
    for (i, pair) in pairs.iter_mut().enumerate() {
        *pair = BracketPair {
            team_a: Some(teams[2 * i]),
            team_b: Some(teams[2 * i + 1]),
        };
    }
    liga_typerow::set_ko_round_of_16(&mut l, pairs).unwrap();
    let user = add_profile(&mut l, "typer", false, now).unwrap();
    (l, teams, user)
}

/// Predictions where the first team of every pairing wins all the way:
/// quarters 0,2,4..14, semis 0,4,8,12, final 0 and 8, champion 0.
fn all_favourites(teams: &[TeamId]) -> KoPredictions {
    let mut p = KoPredictions::default();
    for i in 0..8 {
        p.quarter[i] = Some(teams[2 * i]);
    }
    for i in 0..4 {
        p.semi[i] = Some(teams[4 * i]);
    }
    p.final_slots = [Some(teams[0]), Some(teams[8])];
    p.champion = Some(teams[0]);
    p
}

fn bet<'a>(l: &'a League, user: UserId) -> &'a KoBet {
    l.ko_bet(user).unwrap()
}

#[test]
fn correct_quarter_slot_earns_quarter_weight() {
    let (mut l, teams, user) = league_with_bracket();
    let now = t0();
    place_ko_bet(&mut l, user, all_favourites(&teams), now).unwrap();

    resolve_ko_slot(&mut l, KoRound::Quarter, 0, teams[0], now).unwrap();
    assert_eq!(bet(&l, user).points_awarded, Some(1));
}

#[test]
fn wrong_quarter_slot_earns_nothing() {
    let (mut l, teams, user) = league_with_bracket();
    let now = t0();
    place_ko_bet(&mut l, user, all_favourites(&teams), now).unwrap();

    // Pairing 0 actually goes to teams[1].
    resolve_ko_slot(&mut l, KoRound::Quarter, 0, teams[1], now).unwrap();
    assert_eq!(bet(&l, user).points_awarded, Some(0));
}

#[test]
fn unresolved_slot_scores_zero_but_stays_recomputable() {
    let (mut l, teams, user) = league_with_bracket();
    let now = t0();
    place_ko_bet(&mut l, user, all_favourites(&teams), now).unwrap();

    settle_knockout(&mut l);
    assert_eq!(bet(&l, user).points_awarded, Some(0));

    // Once the real match concludes the same slot starts counting.
    resolve_ko_slot(&mut l, KoRound::Quarter, 0, teams[0], now).unwrap();
    assert_eq!(bet(&l, user).points_awarded, Some(1));
}

#[test]
fn eliminated_team_prediction_is_a_miss_not_an_error() {
    let (mut l, teams, user) = league_with_bracket();
    let now = t0();
    // User expects teams[0] to win the whole left side.
    place_ko_bet(&mut l, user, all_favourites(&teams), now).unwrap();

    // teams[0] is knocked out immediately; teams[1] and [2] carry the bracket.
    resolve_ko_slot(&mut l, KoRound::Quarter, 0, teams[1], now).unwrap();
    resolve_ko_slot(&mut l, KoRound::Quarter, 1, teams[2], now).unwrap();
    resolve_ko_slot(&mut l, KoRound::Semi, 0, teams[2], now).unwrap();

    // Quarter slot 1 prediction (teams[2]) hit: +1. Semi slot 0 predicted
    // teams[0], long eliminated: plain miss, no error, no points.
    assert_eq!(bet(&l, user).points_awarded, Some(1));
}

#[test]
fn resolving_a_round_before_its_feeders_is_rejected() {
    let (mut l, teams, _) = league_with_bracket();
    let now = t0();
    assert_eq!(
        resolve_ko_slot(&mut l, KoRound::Semi, 0, teams[0], now),
        Err(LeagueError::UnresolvedPrerequisite)
    );
    assert_eq!(
        resolve_ko_slot(&mut l, KoRound::Champion, 0, teams[0], now),
        Err(LeagueError::UnresolvedPrerequisite)
    );
}

#[test]
fn resolving_with_a_team_outside_the_pairing_is_rejected() {
    let (mut l, teams, _) = league_with_bracket();
    let now = t0();
    assert_eq!(
        resolve_ko_slot(&mut l, KoRound::Quarter, 0, teams[5], now),
        Err(LeagueError::UnreachablePick(teams[5]))
    );
}

#[test]
fn re_resolving_a_slot_is_a_noop_unless_the_team_differs() {
    let (mut l, teams, _) = league_with_bracket();
    let now = t0();
    resolve_ko_slot(&mut l, KoRound::Quarter, 0, teams[0], now).unwrap();
    // Same outcome again: fine (retry safety).
    resolve_ko_slot(&mut l, KoRound::Quarter, 0, teams[0], now).unwrap();
    // Conflicting outcome: rejected.
    assert_eq!(
        resolve_ko_slot(&mut l, KoRound::Quarter, 0, teams[1], now),
        Err(LeagueError::SlotAlreadyResolved)
    );
}

#[test]
fn fully_correct_bracket_earns_the_weighted_sum() {
    let (mut l, teams, user) = league_with_bracket();
    let now = t0();
    place_ko_bet(&mut l, user, all_favourites(&teams), now).unwrap();

    for i in 0..8 {
        resolve_ko_slot(&mut l, KoRound::Quarter, i, teams[2 * i], now).unwrap();
    }
    for i in 0..4 {
        resolve_ko_slot(&mut l, KoRound::Semi, i, teams[4 * i], now).unwrap();
    }
    resolve_ko_slot(&mut l, KoRound::Final, 0, teams[0], now).unwrap();
    resolve_ko_slot(&mut l, KoRound::Final, 1, teams[8], now).unwrap();
    resolve_ko_slot(&mut l, KoRound::Champion, 0, teams[0], now).unwrap();

    // Default weights: 8*1 + 4*2 + 2*3 + 5 = 27.
    assert_eq!(bet(&l, user).points_awarded, Some(27));
}

#[test]
fn settlement_is_idempotent() {
    let (mut l, teams, user) = league_with_bracket();
    let now = t0();
    place_ko_bet(&mut l, user, all_favourites(&teams), now).unwrap();
    resolve_ko_slot(&mut l, KoRound::Quarter, 0, teams[0], now).unwrap();

    let before = bet(&l, user).points_awarded;
    settle_knockout(&mut l);
    settle_knockout(&mut l);
    assert_eq!(bet(&l, user).points_awarded, before);
}

#[test]
fn round_of_16_is_frozen_once_resolution_starts() {
    let (mut l, teams, _) = league_with_bracket();
    let now = t0();
    resolve_ko_slot(&mut l, KoRound::Quarter, 0, teams[0], now).unwrap();

    let pairs = l.ko_tree.round_of_16;
    assert_eq!(
        liga_typerow::set_ko_round_of_16(&mut l, pairs),
        Err(LeagueError::BracketAlreadyStarted)
    );
}
