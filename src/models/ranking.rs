//! Per-user ranking rows (the leaderboard's backing data).

use crate::models::profile::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user's aggregated points. `total_points` is always the sum of the four
/// components; the aggregator rewrites the whole row, it never patches fields.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub id: Uuid,
    pub user_id: UserId,
    pub match_points: u32,
    pub scorer_points: u32,
    pub ko_points: u32,
    /// Admin-assigned extras; carried through re-aggregation, never derived.
    pub bonus_points: u32,
    pub total_points: u32,
    pub updated_at: DateTime<Utc>,
}

impl Ranking {
    pub fn new(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            match_points: 0,
            scorer_points: 0,
            ko_points: 0,
            bonus_points: 0,
            total_points: 0,
            updated_at: now,
        }
    }
}
