//! Caller identity from the `player` and `password` headers.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::credentials::Actor;

pub const PLAYER_HEADER: &str = "player";
pub const PASSWORD_HEADER: &str = "password";

#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

fn header<'a>(req: &'a HttpRequest, name: &str) -> Result<Option<&'a str>, AppError> {
    req.headers()
        .get(name)
        .map(|v| {
            v.to_str().map_err(|_| {
                AppError::bad_request(ErrorCode::InvalidHeader, format!("{name} header is not valid text"))
            })
        })
        .transpose()
}

fn extract(req: &HttpRequest) -> Result<CurrentActor, AppError> {
    let player = header(req, PLAYER_HEADER)?.ok_or_else(|| {
        AppError::invalid(ErrorCode::InvalidPlayer, "player header is required")
    })?;
    let password = header(req, PASSWORD_HEADER)?.filter(|p| !p.trim().is_empty());
    Ok(CurrentActor(Actor::new(player, password)?))
}

impl FromRequest for CurrentActor {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
