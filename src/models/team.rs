//! Teams and top-scorer candidates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Unique identifier for a player (top-scorer candidate).
pub type PlayerId = Uuid;

/// A national team. Immutable once referenced by a match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Three-letter code shown in compact views (e.g. "POL").
    pub short_name: String,
    pub flag_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(
        name: impl Into<String>,
        short_name: impl Into<String>,
        flag_url: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            short_name: short_name.into(),
            flag_url,
            created_at: now,
        }
    }
}

/// A player tracked for the top-scorer competition. `goals` is the running
/// tournament total, overwritten (not incremented) on each admin update.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team_id: TeamId,
    pub goals: u32,
    pub created_at: DateTime<Utc>,
}

impl Player {
    pub fn new(name: impl Into<String>, team_id: TeamId, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            team_id,
            goals: 0,
            created_at: now,
        }
    }
}
