//! Integration tests for match settlement: point rules, idempotence, guards.

use chrono::{DateTime, Duration, TimeZone, Utc};
use liga_typerow::{
    add_profile, add_team, create_match, place_bet, record_result, settle_match, League,
    LeagueError, MatchId, Phase, UserId,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

/// League with two teams, one group match (deadline t0+1h, 5/2 points) and `n` users.
fn league_with_match(n: usize) -> (League, MatchId, Vec<UserId>) {
    let mut l = League::new();
    let now = t0();
    let a = add_team(&mut l, "Polska", "POL", None, now).unwrap();
    let b = add_team(&mut l, "Niemcy", "GER", None, now).unwrap();
    let m = create_match(
        &mut l,
        Phase::Group,
        Some(1),
        a,
        b,
        now + Duration::hours(1),
        Some((5, 2)),
        now,
    )
    .unwrap();
    let users = (0..n)
        .map(|i| add_profile(&mut l, &format!("user{i}"), false, now).unwrap())
        .collect();
    (l, m, users)
}

#[test]
fn exact_score_outcome_and_miss() {
    let (mut l, m, users) = league_with_match(3);
    let now = t0();
    place_bet(&mut l, users[0], m, (2, 1), now).unwrap(); // exact
    place_bet(&mut l, users[1], m, (3, 0), now).unwrap(); // right outcome
    place_bet(&mut l, users[2], m, (1, 2), now).unwrap(); // wrong outcome

    record_result(&mut l, m, 2, 1, now + Duration::hours(3)).unwrap();

    assert_eq!(l.bet(users[0], m).unwrap().points_awarded, Some(5));
    assert_eq!(l.bet(users[1], m).unwrap().points_awarded, Some(2));
    assert_eq!(l.bet(users[2], m).unwrap().points_awarded, Some(0));
}

#[test]
fn draw_is_its_own_outcome_direction() {
    let (mut l, m, users) = league_with_match(2);
    let now = t0();
    place_bet(&mut l, users[0], m, (1, 1), now).unwrap();
    place_bet(&mut l, users[1], m, (2, 1), now).unwrap();

    record_result(&mut l, m, 2, 2, now + Duration::hours(3)).unwrap();

    // Predicted draw, actual draw: outcome points. A home-win pick misses.
    assert_eq!(l.bet(users[0], m).unwrap().points_awarded, Some(2));
    assert_eq!(l.bet(users[1], m).unwrap().points_awarded, Some(0));
}

#[test]
fn settling_unfinished_match_is_rejected() {
    let (mut l, m, _) = league_with_match(1);
    assert_eq!(settle_match(&mut l, m), Err(LeagueError::MatchNotFinished(m)));
}

#[test]
fn recording_a_result_twice_is_rejected() {
    let (mut l, m, users) = league_with_match(1);
    let now = t0();
    place_bet(&mut l, users[0], m, (1, 0), now).unwrap();
    record_result(&mut l, m, 1, 0, now + Duration::hours(3)).unwrap();

    assert_eq!(
        record_result(&mut l, m, 4, 4, now + Duration::hours(4)),
        Err(LeagueError::MatchAlreadyFinished(m))
    );
    // The original settlement is untouched.
    assert_eq!(l.bet(users[0], m).unwrap().points_awarded, Some(5));
}

#[test]
fn resettling_is_idempotent() {
    let (mut l, m, users) = league_with_match(2);
    let now = t0();
    place_bet(&mut l, users[0], m, (2, 1), now).unwrap();
    place_bet(&mut l, users[1], m, (0, 3), now).unwrap();
    record_result(&mut l, m, 2, 1, now + Duration::hours(3)).unwrap();

    let before: Vec<_> = l.bets.iter().map(|b| b.points_awarded).collect();
    settle_match(&mut l, m).unwrap();
    settle_match(&mut l, m).unwrap();
    let after: Vec<_> = l.bets.iter().map(|b| b.points_awarded).collect();
    assert_eq!(before, after);
}

#[test]
fn users_are_settled_independently() {
    let (mut l, m, users) = league_with_match(2);
    let now = t0();
    place_bet(&mut l, users[0], m, (2, 1), now).unwrap();
    place_bet(&mut l, users[1], m, (2, 1), now).unwrap();
    record_result(&mut l, m, 2, 1, now + Duration::hours(3)).unwrap();

    // Same prediction, same points, separate rows.
    assert_eq!(l.bet(users[0], m).unwrap().points_awarded, Some(5));
    assert_eq!(l.bet(users[1], m).unwrap().points_awarded, Some(5));
    assert_eq!(l.bets.len(), 2);
}

#[test]
fn awarded_points_are_only_ever_zero_winner_or_exact() {
    let (mut l, m, users) = league_with_match(4);
    let now = t0();
    for (i, predicted) in [(2, 1), (5, 0), (0, 0), (1, 3)].iter().enumerate() {
        place_bet(&mut l, users[i], m, *predicted, now).unwrap();
    }
    record_result(&mut l, m, 2, 1, now + Duration::hours(3)).unwrap();

    for bet in &l.bets {
        let p = bet.points_awarded.unwrap();
        assert!(p == 0 || p == 2 || p == 5, "unexpected points {p}");
        let exact = bet.predicted == (2, 1);
        assert_eq!(p == 5, exact);
    }
}
