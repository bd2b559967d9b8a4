//! User bets: match score bets, knockout-tree bets, top-scorer bets.

use crate::models::matches::MatchId;
use crate::models::profile::UserId;
use crate::models::team::{PlayerId, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's score prediction for one match. Unique per (user, match).
///
/// Writable until the match's bet deadline; `points_awarded` is None until the
/// match is settled and is only ever written by settlement.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub id: Uuid,
    pub user_id: UserId,
    pub match_id: MatchId,
    /// Predicted (team_a goals, team_b goals).
    pub predicted: (u32, u32),
    pub points_awarded: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bet {
    pub fn new(user_id: UserId, match_id: MatchId, predicted: (u32, u32), now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            match_id,
            predicted,
            points_awarded: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A user's predicted bracket progression, mirroring the tree shape.
/// A `None` slot is simply "no pick made" and can never score.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct KoPredictions {
    /// Predicted winners of the eight round-of-16 pairings.
    pub quarter: [Option<TeamId>; 8],
    pub semi: [Option<TeamId>; 4],
    pub final_slots: [Option<TeamId>; 2],
    pub champion: Option<TeamId>,
}

/// A user's knockout bet. Unique per user; writable until the league's
/// knockout lock deadline.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KoBet {
    pub id: Uuid,
    pub user_id: UserId,
    pub predictions: KoPredictions,
    pub points_awarded: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KoBet {
    pub fn new(user_id: UserId, predictions: KoPredictions, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            predictions,
            points_awarded: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A user's top-scorer pick. Unique per user.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScorerBet {
    pub id: Uuid,
    pub user_id: UserId,
    pub player_id: PlayerId,
    pub points_awarded: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScorerBet {
    pub fn new(user_id: UserId, player_id: PlayerId, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            player_id,
            points_awarded: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Scoring for the top-scorer bet: full points for hitting a top scorer,
/// optional partial credit for a pick inside the top N.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScorerScoring {
    pub exact: u32,
    pub top_n: Option<TopNScoring>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TopNScoring {
    pub n: usize,
    pub points: u32,
}

impl Default for ScorerScoring {
    fn default() -> Self {
        Self {
            exact: 10,
            top_n: None,
        }
    }
}
