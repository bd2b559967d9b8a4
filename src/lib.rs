//! Liga Typerow: football prediction league with a deterministic settlement
//! engine, exposed as a library plus a web binary.

pub mod logic;
pub mod models;

pub use logic::{
    add_player, add_profile, add_team, create_match, import_teams_csv, leaderboard,
    mark_scorers_final, place_bet, place_ko_bet, place_scorer_bet, record_goals, record_result,
    recompute_all_rankings, recompute_ranking, resolve_ko_slot, run_scorer_settlement, score_bet,
    set_bonus_points, set_ko_round_of_16, settle_knockout, settle_match, settle_scorers, KoRound,
};
pub use models::{
    Bet, BracketPair, KoBet, KoPredictions, KoRoundWeights, KoTree, League, LeagueError, LeagueId,
    LeagueSettings, Match, MatchId, Phase, Player, PlayerId, Profile, Ranking, ScorerBet,
    ScorerScoring, Team, TeamId, TopNScoring, UserId,
};
