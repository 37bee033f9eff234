//! ETag helpers for game reads.
//!
//! A game's `lock_version` changes on every committed write, so it doubles
//! as the entity tag for `GET /api/games/{id}`. Enemies see a different
//! body than citizens, so the tag also records which view was rendered.

use actix_web::http::header::IF_NONE_MATCH;
use actix_web::HttpRequest;
use uuid::Uuid;

/// Format: `"game-{id}-v{version}"`, with an `-e` suffix for the enemy view
/// (quoted, as HTTP requires).
pub fn game_etag(id: Uuid, version: i32, enemy_view: bool) -> String {
    let suffix = if enemy_view { "-e" } else { "" };
    format!(r#""game-{id}-v{version}{suffix}""#)
}

/// Whether the request's `If-None-Match` matches `etag` (or is `*`).
pub fn if_none_match_hits(req: &HttpRequest, etag: &str) -> bool {
    req.headers()
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|client| {
            client.trim() == "*" || client.split(',').map(str::trim).any(|t| t == etag)
        })
}
