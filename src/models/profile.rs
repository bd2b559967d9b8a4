//! User profiles (the minimum the engine needs: identity and join order).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user.
pub type UserId = Uuid;

/// A league member. `created_at` doubles as the leaderboard tie-break key
/// (earlier joiners rank above later ones on equal points).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub username: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(username: impl Into<String>, is_admin: bool, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            is_admin,
            created_at: now,
        }
    }
}
