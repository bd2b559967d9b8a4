//! Knockout tree: the single shared ground-truth bracket.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// One round-of-16 pairing. Teams may be unknown until the group stage ends.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketPair {
    pub team_a: Option<TeamId>,
    pub team_b: Option<TeamId>,
}

/// The actual bracket progression, filled round by round as real matches
/// conclude. A `None` slot means "not yet decided", which is distinct from any
/// team having advanced; settlement must treat it as unknown, never as a miss.
///
/// Slot wiring: quarter slot `i` is fed by `round_of_16[i]`; semi slot `i` by
/// quarter slots `2i` and `2i+1`; final slot `i` by semi slots `2i` and
/// `2i+1`; the champion by the two final slots.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct KoTree {
    pub round_of_16: [BracketPair; 8],
    /// Teams that actually advanced to the quarter-finals.
    pub quarter: [Option<TeamId>; 8],
    /// Teams that actually advanced to the semi-finals.
    pub semi: [Option<TeamId>; 4],
    /// The two actual finalists.
    pub final_slots: [Option<TeamId>; 2],
    /// The actual tournament winner.
    pub champion: Option<TeamId>,
}

impl KoTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once any slot beyond the round of 16 has been resolved.
    pub fn has_resolutions(&self) -> bool {
        self.quarter.iter().any(Option::is_some)
            || self.semi.iter().any(Option::is_some)
            || self.final_slots.iter().any(Option::is_some)
            || self.champion.is_some()
    }

    /// The two teams that can reach quarter slot `index` (its R16 pairing).
    pub fn quarter_feeders(&self, index: usize) -> (Option<TeamId>, Option<TeamId>) {
        let pair = &self.round_of_16[index];
        (pair.team_a, pair.team_b)
    }
}

/// Points awarded per correct slot in each knockout round. Weights grow
/// toward the final; these are league configuration, not fixed rules.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KoRoundWeights {
    pub quarter: u32,
    pub semi: u32,
    #[serde(rename = "final")]
    pub final_round: u32,
    pub champion: u32,
}

impl Default for KoRoundWeights {
    fn default() -> Self {
        Self {
            quarter: 1,
            semi: 2,
            final_round: 3,
            champion: 5,
        }
    }
}
