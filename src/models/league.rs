//! League aggregate: all records for one prediction league, plus settings.

use crate::models::bet::{Bet, KoBet, ScorerBet, ScorerScoring};
use crate::models::bracket::{KoRoundWeights, KoTree};
use crate::models::matches::{Match, MatchId};
use crate::models::profile::{Profile, UserId};
use crate::models::ranking::Ranking;
use crate::models::team::{Player, PlayerId, Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a league.
pub type LeagueId = Uuid;

/// Errors that can occur during league operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// Referenced team does not exist.
    UnknownTeam(TeamId),
    /// Referenced player does not exist.
    UnknownPlayer(PlayerId),
    /// Referenced match does not exist.
    UnknownMatch(MatchId),
    /// Referenced user has no profile.
    UnknownUser(UserId),
    /// A team with this name already exists (names unique, case-insensitive).
    DuplicateTeamName,
    /// A match needs two distinct teams.
    SameTeam,
    /// Group number must be 1-6 and present iff the phase is the group stage.
    InvalidGroupNumber,
    /// The betting deadline for this match has passed (or it is finished).
    BettingClosed(MatchId),
    /// The knockout/scorer lock deadline has passed.
    PredictionsLocked,
    /// The match already has a recorded result.
    MatchAlreadyFinished(MatchId),
    /// The match has no recorded result yet, so it cannot be settled.
    MatchNotFinished(MatchId),
    /// Bracket slot index outside the round's slot count.
    SlotIndexOutOfRange { index: usize, len: usize },
    /// The feeding slots of the previous round are not all resolved yet.
    UnresolvedPrerequisite,
    /// The team cannot reach this slot from its upstream winners.
    UnreachablePick(TeamId),
    /// The slot is already resolved with a different team.
    SlotAlreadyResolved,
    /// The round of 16 cannot be replaced once later rounds are resolved.
    BracketAlreadyStarted,
    /// Scorer settlement requires the scorer standings to be finalized.
    ScorersNotFinal,
    /// Scorer standings are final; goal totals can no longer change.
    ScorersFinal,
    /// No player has scored yet, so there is no top scorer to settle against.
    NoGoalsScored,
    /// Malformed CSV input for team import.
    InvalidCsv(String),
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::UnknownTeam(_) => write!(f, "Team not found"),
            LeagueError::UnknownPlayer(_) => write!(f, "Player not found"),
            LeagueError::UnknownMatch(_) => write!(f, "Match not found"),
            LeagueError::UnknownUser(_) => write!(f, "User not found"),
            LeagueError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            LeagueError::SameTeam => write!(f, "A match needs two different teams"),
            LeagueError::InvalidGroupNumber => {
                write!(f, "Group number must be 1-6 and only set for group-stage matches")
            }
            LeagueError::BettingClosed(_) => write!(f, "Betting for this match is closed"),
            LeagueError::PredictionsLocked => write!(f, "Predictions are locked"),
            LeagueError::MatchAlreadyFinished(_) => write!(f, "Match already has a result"),
            LeagueError::MatchNotFinished(_) => write!(f, "Match has no result yet"),
            LeagueError::SlotIndexOutOfRange { index, len } => {
                write!(f, "Slot index {} out of range (round has {} slots)", index, len)
            }
            LeagueError::UnresolvedPrerequisite => {
                write!(f, "Previous round for this slot is not fully resolved")
            }
            LeagueError::UnreachablePick(_) => {
                write!(f, "Team cannot reach this slot from its upstream winners")
            }
            LeagueError::SlotAlreadyResolved => {
                write!(f, "Slot is already resolved with a different team")
            }
            LeagueError::BracketAlreadyStarted => {
                write!(f, "Round of 16 cannot change once later rounds are resolved")
            }
            LeagueError::ScorersNotFinal => write!(f, "Scorer standings are not final yet"),
            LeagueError::ScorersFinal => write!(f, "Scorer standings are already final"),
            LeagueError::NoGoalsScored => write!(f, "No goals scored yet"),
            LeagueError::InvalidCsv(msg) => write!(f, "Invalid CSV: {}", msg),
        }
    }
}

/// Tunable scoring and lock configuration for a league.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeagueSettings {
    pub ko_round_weights: KoRoundWeights,
    pub scorer_scoring: ScorerScoring,
    /// Knockout and scorer bets lock at this instant; None means still open.
    pub ko_lock_deadline: Option<DateTime<Utc>>,
    /// One-way flag: flipped by the admin when goal totals are complete.
    pub scorers_final: bool,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            ko_round_weights: KoRoundWeights::default(),
            scorer_scoring: ScorerScoring::default(),
            ko_lock_deadline: None,
            scorers_final: false,
        }
    }
}

/// Full league state: teams, matches, bets, the knockout tree, and rankings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
    pub profiles: Vec<Profile>,
    pub bets: Vec<Bet>,
    pub ko_tree: KoTree,
    pub ko_bets: Vec<KoBet>,
    pub scorer_bets: Vec<ScorerBet>,
    pub rankings: Vec<Ranking>,
    pub settings: LeagueSettings,
}

impl League {
    /// Create an empty league with default settings.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            teams: Vec::new(),
            players: Vec::new(),
            matches: Vec::new(),
            profiles: Vec::new(),
            bets: Vec::new(),
            ko_tree: KoTree::new(),
            ko_bets: Vec::new(),
            scorer_bets: Vec::new(),
            rankings: Vec::new(),
            settings: LeagueSettings::default(),
        }
    }

    pub fn team(&self, id: TeamId) -> Result<&Team, LeagueError> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or(LeagueError::UnknownTeam(id))
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, LeagueError> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(LeagueError::UnknownPlayer(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, LeagueError> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(LeagueError::UnknownPlayer(id))
    }

    pub fn match_by_id(&self, id: MatchId) -> Result<&Match, LeagueError> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .ok_or(LeagueError::UnknownMatch(id))
    }

    pub fn match_mut(&mut self, id: MatchId) -> Result<&mut Match, LeagueError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(LeagueError::UnknownMatch(id))
    }

    pub fn profile(&self, id: UserId) -> Result<&Profile, LeagueError> {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or(LeagueError::UnknownUser(id))
    }

    /// A user's bet on a given match, if any.
    pub fn bet(&self, user_id: UserId, match_id: MatchId) -> Option<&Bet> {
        self.bets
            .iter()
            .find(|b| b.user_id == user_id && b.match_id == match_id)
    }

    pub fn ko_bet(&self, user_id: UserId) -> Option<&KoBet> {
        self.ko_bets.iter().find(|b| b.user_id == user_id)
    }

    pub fn scorer_bet(&self, user_id: UserId) -> Option<&ScorerBet> {
        self.scorer_bets.iter().find(|b| b.user_id == user_id)
    }

    pub fn ranking(&self, user_id: UserId) -> Option<&Ranking> {
        self.rankings.iter().find(|r| r.user_id == user_id)
    }
}

impl Default for League {
    fn default() -> Self {
        Self::new()
    }
}
