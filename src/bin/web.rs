//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_files::Files;
use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use liga_typerow::{
    add_player, add_profile, add_team, create_match, import_teams_csv, leaderboard,
    mark_scorers_final, place_bet, place_ko_bet, place_scorer_bet, record_goals, record_result,
    resolve_ko_slot, run_scorer_settlement, set_bonus_points, set_ko_round_of_16, BracketPair,
    KoPredictions, KoRound, KoRoundWeights, League, LeagueId, Phase, ScorerScoring,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-league entry: league data + last activity time (for auto-cleanup).
struct LeagueEntry {
    league: League,
    last_activity: Instant,
}

/// In-memory state: many leagues by ID (sessioned). Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<LeagueId, LeagueEntry>>>;

/// Inactivity threshold: leagues not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddProfileBody {
    username: String,
    #[serde(default)]
    is_admin: bool,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    short_name: String,
    flag_url: Option<String>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    team_id: Uuid,
}

#[derive(Deserialize)]
struct SetGoalsBody {
    goals: u32,
}

#[derive(Deserialize)]
struct CreateMatchBody {
    phase: Phase,
    group_number: Option<u8>,
    team_a: Uuid,
    team_b: Uuid,
    bet_deadline: DateTime<Utc>,
    points_for_exact: Option<u32>,
    points_for_winner: Option<u32>,
}

#[derive(Deserialize)]
struct RecordResultBody {
    team_a_score: u32,
    team_b_score: u32,
}

#[derive(Deserialize)]
struct PlaceBetBody {
    user_id: Uuid,
    match_id: Uuid,
    team_a_score: u32,
    team_b_score: u32,
}

#[derive(Deserialize)]
struct PlaceKoBetBody {
    user_id: Uuid,
    predictions: KoPredictions,
}

#[derive(Deserialize)]
struct PlaceScorerBetBody {
    user_id: Uuid,
    player_id: Uuid,
}

#[derive(Deserialize)]
struct RoundOf16Body {
    pairs: [BracketPair; 8],
}

#[derive(Deserialize)]
struct ResolveSlotBody {
    round: KoRound,
    #[serde(default)]
    index: usize,
    team_id: Uuid,
}

#[derive(Deserialize)]
struct BonusBody {
    points: u32,
}

#[derive(Deserialize)]
struct KoWeightsBody {
    weights: KoRoundWeights,
}

#[derive(Deserialize)]
struct ScorerScoringBody {
    scoring: ScorerScoring,
}

#[derive(Deserialize)]
struct KoLockBody {
    deadline: Option<DateTime<Utc>>,
}

/// Path segment: league id (e.g. /api/leagues/{id})
#[derive(Deserialize)]
struct LeaguePath {
    id: LeagueId,
}

/// Path segments: league id and a nested resource id.
#[derive(Deserialize)]
struct LeagueItemPath {
    id: LeagueId,
    item_id: Uuid,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "liga-typerow",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new league (returns it with id; client stores id for subsequent requests).
#[post("/api/leagues")]
async fn api_create_league(state: AppState) -> HttpResponse {
    let league = League::new();
    let id = league.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        LeagueEntry {
            league,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(&g.get(&id).unwrap().league)
}

/// Get a league by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/leagues/{id}")]
async fn api_get_league(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.league)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    }
}

/// Register a league member.
#[post("/api/leagues/{id}/profiles")]
async fn api_add_profile(state: AppState, path: Path<LeaguePath>, body: Json<AddProfileBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match add_profile(l, &body.username, body.is_admin, Utc::now()) {
        Ok(user_id) => HttpResponse::Ok().json(serde_json::json!({ "user_id": user_id })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Add a team (admin).
#[post("/api/leagues/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<LeaguePath>, body: Json<AddTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match add_team(l, &body.name, &body.short_name, body.flag_url.clone(), Utc::now()) {
        Ok(team_id) => HttpResponse::Ok().json(serde_json::json!({ "team_id": team_id })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Bulk-import teams from a CSV body (name,short_name,flag_url header).
#[post("/api/leagues/{id}/teams/import")]
async fn api_import_teams(state: AppState, path: Path<LeaguePath>, body: String) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match import_teams_csv(l, &body, Utc::now()) {
        Ok(added) => HttpResponse::Ok().json(serde_json::json!({ "imported": added })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Add a top-scorer candidate (admin).
#[post("/api/leagues/{id}/players")]
async fn api_add_player(state: AppState, path: Path<LeaguePath>, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match add_player(l, &body.name, body.team_id, Utc::now()) {
        Ok(player_id) => HttpResponse::Ok().json(serde_json::json!({ "player_id": player_id })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Update a player's goal total (admin).
#[put("/api/leagues/{id}/players/{item_id}/goals")]
async fn api_set_goals(state: AppState, path: Path<LeagueItemPath>, body: Json<SetGoalsBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match record_goals(l, path.item_id, body.goals) {
        Ok(()) => HttpResponse::Ok().json(l),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Create a match (admin).
#[post("/api/leagues/{id}/matches")]
async fn api_create_match(state: AppState, path: Path<LeaguePath>, body: Json<CreateMatchBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    let points = match (body.points_for_exact, body.points_for_winner) {
        (Some(e), Some(w)) => Some((e, w)),
        _ => None,
    };
    match create_match(
        l,
        body.phase,
        body.group_number,
        body.team_a,
        body.team_b,
        body.bet_deadline,
        points,
        Utc::now(),
    ) {
        Ok(match_id) => HttpResponse::Ok().json(serde_json::json!({ "match_id": match_id })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Record a match result; settles its bets and refreshes rankings (admin).
#[put("/api/leagues/{id}/matches/{item_id}/result")]
async fn api_record_result(state: AppState, path: Path<LeagueItemPath>, body: Json<RecordResultBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match record_result(l, path.item_id, body.team_a_score, body.team_b_score, Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(l),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Place or update a match bet (open until the match's deadline).
#[post("/api/leagues/{id}/bets")]
async fn api_place_bet(state: AppState, path: Path<LeaguePath>, body: Json<PlaceBetBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match place_bet(
        l,
        body.user_id,
        body.match_id,
        (body.team_a_score, body.team_b_score),
        Utc::now(),
    ) {
        Ok(()) => HttpResponse::Ok().json(l),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Place or update the knockout bet (open until the knockout lock deadline).
#[post("/api/leagues/{id}/ko-bet")]
async fn api_place_ko_bet(state: AppState, path: Path<LeaguePath>, body: Json<PlaceKoBetBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match place_ko_bet(l, body.user_id, body.predictions.clone(), Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(l),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Place or update the top-scorer bet.
#[post("/api/leagues/{id}/scorer-bet")]
async fn api_place_scorer_bet(state: AppState, path: Path<LeaguePath>, body: Json<PlaceScorerBetBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match place_scorer_bet(l, body.user_id, body.player_id, Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(l),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Set the round-of-16 pairings (admin, before any later round is resolved).
#[put("/api/leagues/{id}/ko-tree/round-of-16")]
async fn api_set_round_of_16(state: AppState, path: Path<LeaguePath>, body: Json<RoundOf16Body>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match set_ko_round_of_16(l, body.pairs) {
        Ok(()) => HttpResponse::Ok().json(l),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Record an actual bracket outcome; re-scores knockout bets (admin).
#[put("/api/leagues/{id}/ko-tree/resolve")]
async fn api_resolve_slot(state: AppState, path: Path<LeaguePath>, body: Json<ResolveSlotBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match resolve_ko_slot(l, body.round, body.index, body.team_id, Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(l),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Mark scorer standings final and settle scorer bets (admin).
#[post("/api/leagues/{id}/settle/scorers")]
async fn api_settle_scorers(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    mark_scorers_final(l);
    match run_scorer_settlement(l, Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(l),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Set a user's bonus points (admin).
#[put("/api/leagues/{id}/profiles/{item_id}/bonus")]
async fn api_set_bonus(state: AppState, path: Path<LeagueItemPath>, body: Json<BonusBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match set_bonus_points(l, path.item_id, body.points, Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(l),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Leaderboard: rankings sorted by total points, ties by earliest join.
#[get("/api/leagues/{id}/leaderboard")]
async fn api_leaderboard(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(leaderboard(&entry.league))
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    }
}

/// Update knockout round weights (admin).
#[put("/api/leagues/{id}/settings/ko-weights")]
async fn api_set_ko_weights(state: AppState, path: Path<LeaguePath>, body: Json<KoWeightsBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    entry.league.settings.ko_round_weights = body.weights;
    HttpResponse::Ok().json(&entry.league)
}

/// Update scorer scoring config (admin).
#[put("/api/leagues/{id}/settings/scorer-scoring")]
async fn api_set_scorer_scoring(state: AppState, path: Path<LeaguePath>, body: Json<ScorerScoringBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    entry.league.settings.scorer_scoring = body.scoring;
    HttpResponse::Ok().json(&entry.league)
}

/// Set (or clear) the knockout/scorer lock deadline (admin).
#[put("/api/leagues/{id}/settings/ko-lock")]
async fn api_set_ko_lock(state: AppState, path: Path<LeaguePath>, body: Json<KoLockBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" })),
    };
    entry.last_activity = Instant::now();
    entry.league.settings.ko_lock_deadline = body.deadline;
    HttpResponse::Ok().json(&entry.league)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<LeagueId, LeagueEntry>::new()));

    // Background task: every 30 minutes, remove leagues inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive league(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_league)
            .service(api_get_league)
            .service(api_add_profile)
            .service(api_add_team)
            .service(api_import_teams)
            .service(api_add_player)
            .service(api_set_goals)
            .service(api_create_match)
            .service(api_record_result)
            .service(api_place_bet)
            .service(api_place_ko_bet)
            .service(api_place_scorer_bet)
            .service(api_set_round_of_16)
            .service(api_resolve_slot)
            .service(api_settle_scorers)
            .service(api_set_bonus)
            .service(api_leaderboard)
            .service(api_set_ko_weights)
            .service(api_set_scorer_scoring)
            .service(api_set_ko_lock)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
