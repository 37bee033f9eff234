//! Game HTTP routes, mounted under `/api/games`.
//!
//! Handlers only translate between HTTP and the services: extract ids,
//! caller and body, call one service method, wrap the result in the
//! success envelope. Every failure is an [`AppError`] rendered as
//! problem details.

use actix_web::http::header::{ETAG, VARY};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::domain::state::GameStatus;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentActor, GameId, GameRoundIds, ValidatedJson};
use crate::http::etag::{game_etag, if_none_match_hits};
use crate::protocol::games::{
    ActionRequest, CreateGameRequest, Envelope, JoinGameRequest, ProposeGroupRequest,
    SearchQuery, VoteRequest,
};
use crate::repos::games::GameSearch;
use crate::state::app_state::AppState;

/// GET /api/games?name&status&page&limit
async fn search_games(
    query: web::Query<SearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|raw| {
            GameStatus::parse(raw).ok_or_else(|| {
                AppError::invalid(
                    ErrorCode::ValidationError,
                    format!("Unknown status '{raw}', expected lobby, rounds or ended"),
                )
            })
        })
        .transpose()?;
    let filter = GameSearch::new(query.name.as_deref(), status, query.page, query.limit);

    let games = app_state.games().search_games(&filter).await?;
    let msg = if games.is_empty() {
        "No games found"
    } else {
        "Games found"
    };
    Ok(Envelope::ok(msg, games))
}

/// POST /api/games
async fn create_game(
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let view = app_state
        .games()
        .create_game(&req.name, &req.owner, req.password.as_deref())
        .await?;
    Ok(Envelope::respond(StatusCode::CREATED, "Game Created", view))
}

/// GET /api/games/{game_id}
///
/// Carries an ETag built from the game's version and the viewer's side; a
/// matching `If-None-Match` yields `304 Not Modified` without a body. The
/// body depends on the `player` header, hence `Vary: player`.
async fn get_game(
    http_req: HttpRequest,
    game_id: GameId,
    CurrentActor(actor): CurrentActor,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (view, version) = app_state.games().get_game(game_id.0, &actor).await?;
    let etag = game_etag(game_id.0, version, !view.enemies.is_empty());

    if if_none_match_hits(&http_req, &etag) {
        return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
            .insert_header((ETAG, etag))
            .insert_header((VARY, "player"))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag))
        .insert_header((VARY, "player"))
        .json(Envelope {
            status: StatusCode::OK.as_u16(),
            msg: "Game found",
            data: view,
        }))
}

/// PUT /api/games/{game_id}
///
/// The body is optional; without `player` the caller joins themselves.
async fn join_game(
    game_id: GameId,
    CurrentActor(actor): CurrentActor,
    body: ValidatedJson<Option<JoinGameRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner().unwrap_or_default();
    let view = app_state
        .game_flow()
        .join_game(game_id.0, &actor, req.player.as_deref())
        .await?;
    Ok(Envelope::ok("Joined successfully", view))
}

/// HEAD /api/games/{game_id}/start
async fn start_game(
    game_id: GameId,
    CurrentActor(actor): CurrentActor,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.game_flow().start_game(game_id.0, &actor).await?;
    Ok(HttpResponse::Ok().finish())
}

/// GET /api/games/{game_id}/rounds
async fn get_rounds(
    game_id: GameId,
    CurrentActor(actor): CurrentActor,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let rounds = app_state.games().get_rounds(game_id.0, &actor).await?;
    Ok(Envelope::ok("Results found", rounds))
}

/// GET /api/games/{game_id}/rounds/{round_id}
async fn get_round(
    ids: GameRoundIds,
    CurrentActor(actor): CurrentActor,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round = app_state
        .games()
        .get_round(ids.game_id, ids.round_id, &actor)
        .await?;
    Ok(Envelope::ok("Round found", round))
}

/// PATCH /api/games/{game_id}/rounds/{round_id}
async fn propose_group(
    ids: GameRoundIds,
    CurrentActor(actor): CurrentActor,
    body: ValidatedJson<ProposeGroupRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round = app_state
        .game_flow()
        .propose_group(ids.game_id, ids.round_id, &actor, body.into_inner().group)
        .await?;
    Ok(Envelope::ok("Group proposed successfully", round))
}

/// POST /api/games/{game_id}/rounds/{round_id}
async fn submit_vote(
    ids: GameRoundIds,
    CurrentActor(actor): CurrentActor,
    body: ValidatedJson<VoteRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round = app_state
        .game_flow()
        .submit_vote(ids.game_id, ids.round_id, &actor, body.vote)
        .await?;
    Ok(Envelope::ok("Voted successfully", round))
}

/// PUT /api/games/{game_id}/rounds/{round_id}
async fn submit_action(
    ids: GameRoundIds,
    CurrentActor(actor): CurrentActor,
    body: ValidatedJson<ActionRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round = app_state
        .game_flow()
        .submit_action(ids.game_id, ids.round_id, &actor, body.action)
        .await?;
    Ok(Envelope::ok("Action registered", round))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(search_games))
            .route(web::post().to(create_game)),
    );
    cfg.service(
        web::resource("/{game_id}")
            .route(web::get().to(get_game))
            .route(web::put().to(join_game)),
    );
    cfg.service(web::resource("/{game_id}/start").route(web::head().to(start_game)));
    cfg.service(web::resource("/{game_id}/rounds").route(web::get().to(get_rounds)));
    cfg.service(
        web::resource("/{game_id}/rounds/{round_id}")
            .route(web::get().to(get_round))
            .route(web::patch().to(propose_group))
            .route(web::post().to(submit_vote))
            .route(web::put().to(submit_action)),
    );
}
