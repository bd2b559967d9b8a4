//! Data structures for the prediction league: teams, matches, bets, bracket,
//! rankings, and the league aggregate.

mod bet;
mod bracket;
mod league;
mod matches;
mod profile;
mod ranking;
mod team;

pub use bet::{Bet, KoBet, KoPredictions, ScorerBet, ScorerScoring, TopNScoring};
pub use bracket::{BracketPair, KoRoundWeights, KoTree};
pub use league::{League, LeagueError, LeagueId, LeagueSettings};
pub use matches::{Match, MatchId, Phase, DEFAULT_POINTS_FOR_EXACT, DEFAULT_POINTS_FOR_WINNER};
pub use profile::{Profile, UserId};
pub use ranking::Ranking;
pub use team::{Player, PlayerId, Team, TeamId};
