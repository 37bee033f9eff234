//! Caller identity, password digests and name validation.

use uuid::Uuid;

use crate::domain::rules::{valid_name_len, NAME_LEN};
use crate::domain::state::Game;
use crate::errors::domain::{DomainError, ForbiddenKind, InfraErrorKind, ValidationKind};

/// Who is calling: the `player` header and the optional `password` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub player: String,
    pub password: Option<String>,
}

impl Actor {
    /// Validated actor; the player name is trimmed.
    pub fn new(player: &str, password: Option<&str>) -> Result<Self, DomainError> {
        Ok(Self {
            player: clean_name(player, ValidationKind::InvalidPlayer, "player")?,
            password: password.map(str::to_string),
        })
    }
}

/// Trim `raw` and check its length.
pub fn clean_name(raw: &str, kind: ValidationKind, field: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if valid_name_len(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(DomainError::validation(
            kind,
            format!(
                "{field} must be {} to {} characters",
                NAME_LEN.start(),
                NAME_LEN.end()
            ),
        ))
    }
}

/// Optional game password: blank means an open game, anything else must
/// pass the length check.
pub fn clean_password(raw: Option<&str>) -> Result<Option<String>, DomainError> {
    match raw.map(str::trim).filter(|p| !p.is_empty()) {
        None => Ok(None),
        Some(p) => clean_name(p, ValidationKind::InvalidPassword, "password").map(Some),
    }
}

/// Salted digest of a game password, hex encoded.
pub fn password_digest(game_id: Uuid, password: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(game_id.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Check the supplied password against a protected game.
///
/// Unprotected games accept any caller.
pub fn verify_password(game: &Game, supplied: Option<&str>) -> Result<(), DomainError> {
    let Some(stored) = game.password_digest.as_deref() else {
        return Ok(());
    };
    let Some(supplied) = supplied else {
        return Err(DomainError::unauthorized("Password required"));
    };
    let stored = blake3::Hash::from_hex(stored).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("stored password digest is invalid: {e}"),
        )
    })?;
    let mut hasher = blake3::Hasher::new();
    hasher.update(game.id.as_bytes());
    hasher.update(supplied.as_bytes());
    // blake3::Hash equality is constant time.
    if hasher.finalize() == stored {
        Ok(())
    } else {
        Err(DomainError::unauthorized("Incorrect password"))
    }
}

/// Password check followed by a membership check.
pub fn authorize_member(game: &Game, actor: &Actor) -> Result<(), DomainError> {
    verify_password(game, actor.password.as_deref())?;
    if game.is_player(&actor.player) {
        Ok(())
    } else {
        Err(DomainError::forbidden(
            ForbiddenKind::NotAMember,
            format!("{} is not part of this game", actor.player),
        ))
    }
}
