use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::game_config::GameConfig;
use crate::domain::roles::{ActionCode, SeatId};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::ValidatedJson;
use crate::services::game_flow::{ActionOutcome, GameStatus, LastNightSummary};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitResponse {
    message: &'static str,
    seat_count: usize,
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    id: SeatId,
    name: String,
    password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterResponse {
    id: SeatId,
    name: String,
    role_name: &'static str,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionRequest {
    id: SeatId,
    password: String,
    action_code: ActionCode,
    #[serde(default)]
    target: Option<SeatId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayEndRequest {
    banish_id: SeatId,
}

#[derive(Debug, Serialize)]
struct DayEndResponse {
    successful: bool,
    message: String,
}

async fn init(
    app_state: web::Data<AppState>,
    body: ValidatedJson<GameConfig>,
) -> Result<web::Json<InitResponse>, AppError> {
    let seat_count = app_state.game.initialize(body.into_inner())?;
    Ok(web::Json(InitResponse {
        message: "Game successfully initialized!",
        seat_count,
    }))
}

async fn register(
    app_state: web::Data<AppState>,
    body: ValidatedJson<RegisterRequest>,
) -> Result<web::Json<RegisterResponse>, AppError> {
    let RegisterRequest { id, name, password } = body.into_inner();
    if name.trim().is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::BadRequest,
            "Player name must not be empty",
        ));
    }

    let registration = app_state.game.register(id, name.trim(), &password)?;
    Ok(web::Json(RegisterResponse {
        id: registration.seat,
        name: registration.name,
        role_name: registration.role.name(),
    }))
}

async fn start(app_state: web::Data<AppState>) -> Result<web::Json<MessageResponse>, AppError> {
    app_state.game.start()?;
    Ok(web::Json(MessageResponse {
        message: "Game started",
    }))
}

/// Bad seat ids on `/action` are treated like bad credentials.
fn as_unauthorized(err: AppError) -> AppError {
    match err {
        AppError::Validation { code, detail } => AppError::Unauthorized { code, detail },
        other => other,
    }
}

async fn action(
    app_state: web::Data<AppState>,
    body: ValidatedJson<ActionRequest>,
) -> Result<web::Json<ActionOutcome>, AppError> {
    let req = body.into_inner();
    let outcome = app_state
        .game
        .handle_action(req.id, &req.password, req.action_code, req.target)
        .map_err(as_unauthorized)?;
    Ok(web::Json(outcome))
}

async fn last_night_info(
    app_state: web::Data<AppState>,
) -> Result<web::Json<LastNightSummary>, AppError> {
    Ok(web::Json(app_state.game.last_night_summary()?))
}

async fn day_end(
    app_state: web::Data<AppState>,
    body: ValidatedJson<DayEndRequest>,
) -> Result<web::Json<DayEndResponse>, AppError> {
    let target = body.banish_id;
    app_state.game.banish(target)?;
    Ok(web::Json(DayEndResponse {
        successful: true,
        message: format!("Successfully banished seat {target}"),
    }))
}

async fn status(app_state: web::Data<AppState>) -> HttpResponse {
    let status: GameStatus = app_state.game.status();
    HttpResponse::Ok().json(status)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/init", web::post().to(init))
        .route("/register", web::post().to(register))
        .route("/start", web::post().to(start))
        .route("/action", web::post().to(action))
        .route("/lastnightinfo", web::get().to(last_night_info))
        .route("/dayend", web::post().to(day_end))
        .route("/status", web::get().to(status));
}
