//! Request bodies, query strings and the success envelope.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

/// Success body: `{ status, msg, data }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub msg: &'static str,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn respond(status: StatusCode, msg: &'static str, data: T) -> HttpResponse {
        HttpResponse::build(status).json(Envelope {
            status: status.as_u16(),
            msg,
            data,
        })
    }

    pub fn ok(msg: &'static str, data: T) -> HttpResponse {
        Self::respond(StatusCode::OK, msg, data)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JoinGameRequest {
    #[serde(default)]
    pub player: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProposeGroupRequest {
    pub group: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub vote: bool,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: bool,
}

/// `GET /api/games` query. Paging values are clamped by the search filter,
/// so they are accepted as plain integers here.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
