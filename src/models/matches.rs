//! Matches: tournament phase, score, and per-match point values.

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Tournament phase a match belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Group,
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    ThirdPlace,
    Final,
}

/// A scheduled match between two teams.
///
/// Created by an admin before the betting deadline; mutated exactly once when
/// the result is recorded (score set, `finished` flipped), never after.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub phase: Phase,
    /// Group number 1-6; present iff `phase == Group`.
    pub group_number: Option<u8>,
    pub team_a: TeamId,
    pub team_b: TeamId,
    /// Bets on this match are locked from this instant.
    pub bet_deadline: DateTime<Utc>,
    /// Points for predicting the exact score line.
    pub points_for_exact: u32,
    /// Points for predicting only the correct outcome (win/draw/win).
    pub points_for_winner: u32,
    /// Final score (team_a goals, team_b goals); None until finished.
    pub score: Option<(u32, u32)>,
    pub finished: bool,
    pub created_at: DateTime<Utc>,
}

/// Default point values when a match is created without explicit ones.
pub const DEFAULT_POINTS_FOR_EXACT: u32 = 5;
pub const DEFAULT_POINTS_FOR_WINNER: u32 = 2;

impl Match {
    pub fn new(
        phase: Phase,
        group_number: Option<u8>,
        team_a: TeamId,
        team_b: TeamId,
        bet_deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase,
            group_number,
            team_a,
            team_b,
            bet_deadline,
            points_for_exact: DEFAULT_POINTS_FOR_EXACT,
            points_for_winner: DEFAULT_POINTS_FOR_WINNER,
            score: None,
            finished: false,
            created_at: now,
        }
    }
}
