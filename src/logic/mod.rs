//! League business logic: betting, settlement, ranking aggregation, admin ops.

mod admin;
mod betting;
mod bracket_settlement;
mod match_settlement;
mod ranking;
mod scorer_settlement;

pub use admin::{
    add_player, add_profile, add_team, create_match, import_teams_csv, mark_scorers_final,
    record_goals, record_result, resolve_ko_slot, run_scorer_settlement, set_bonus_points,
    set_ko_round_of_16, KoRound,
};
pub use betting::{place_bet, place_ko_bet, place_scorer_bet};
pub use bracket_settlement::{
    resolve_champion, resolve_final_slot, resolve_quarter_slot, resolve_semi_slot,
    score_predictions, settle_knockout,
};
pub use match_settlement::{score_bet, settle_match};
pub use ranking::{leaderboard, recompute_all_rankings, recompute_ranking};
pub use scorer_settlement::settle_scorers;
