//! Path identifiers.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;

fn path_uuid(req: &HttpRequest, name: &str, code: ErrorCode) -> Result<Uuid, AppError> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| AppError::bad_request(code, format!("Missing {name} parameter")))?;
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request(code, format!("Invalid {name}: {raw}")))
}

/// `{game_id}` from the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameId(pub Uuid);

impl FromRequest for GameId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(path_uuid(req, "game_id", ErrorCode::InvalidGameId).map(GameId))
    }
}

/// `{game_id}` and `{round_id}` from the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRoundIds {
    pub game_id: Uuid,
    pub round_id: Uuid,
}

impl GameRoundIds {
    fn parse(req: &HttpRequest) -> Result<Self, AppError> {
        Ok(Self {
            game_id: path_uuid(req, "game_id", ErrorCode::InvalidGameId)?,
            round_id: path_uuid(req, "round_id", ErrorCode::InvalidRoundId)?,
        })
    }
}

impl FromRequest for GameRoundIds {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(GameRoundIds::parse(req))
    }
}
