//! Row <-> document conversion for the games_sea adapter.

use sea_orm::Set;

use crate::domain::state::{check_invariants, Game};
use crate::entities::games;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Columns derived from a game document.
#[derive(Debug, Clone)]
pub struct GameRowParts {
    pub name_key: String,
    pub status: &'static str,
    pub document: String,
}

impl GameRowParts {
    pub fn of(game: &Game) -> Result<Self, DomainError> {
        Ok(Self {
            name_key: game.name.to_lowercase(),
            status: game.status.as_str(),
            document: serde_json::to_string(game)?,
        })
    }
}

pub fn to_active_model(game: &Game) -> Result<games::ActiveModel, DomainError> {
    let parts = GameRowParts::of(game)?;
    Ok(games::ActiveModel {
        id: Set(game.id),
        name: Set(game.name.clone()),
        name_key: Set(parts.name_key),
        owner: Set(game.owner.clone()),
        status: Set(parts.status.to_string()),
        lock_version: Set(game.lock_version),
        document: Set(parts.document),
        created_at: Set(game.created_at),
        updated_at: Set(game.updated_at),
    })
}

/// Decode a row. The row's `lock_version` wins over the document's copy;
/// a document that breaks the aggregate invariants is `DataCorruption`.
pub fn from_row(row: games::Model) -> Result<Game, DomainError> {
    let mut game: Game = serde_json::from_str(&row.document)?;
    if game.id != row.id {
        return Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("row {} holds document for game {}", row.id, game.id),
        ));
    }
    check_invariants(&game)?;
    game.lock_version = row.lock_version;
    Ok(game)
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    fn row_for(game: &Game) -> games::Model {
        let parts = GameRowParts::of(game).unwrap();
        games::Model {
            id: game.id,
            name: game.name.clone(),
            name_key: parts.name_key,
            owner: game.owner.clone(),
            status: parts.status.to_string(),
            lock_version: 7,
            document: parts.document,
            created_at: game.created_at,
            updated_at: game.updated_at,
        }
    }

    fn lobby() -> Game {
        Game::new("lobby".into(), "owner".into(), None, OffsetDateTime::UNIX_EPOCH)
    }

    #[test]
    fn row_version_wins() {
        let game = lobby();
        let decoded = from_row(row_for(&game)).unwrap();
        assert_eq!(decoded.lock_version, 7);
        assert_eq!(decoded.players, game.players);
    }

    #[test]
    fn broken_document_is_data_corruption() {
        let mut game = lobby();
        game.players.push("owner".into());
        let err = from_row(row_for(&game)).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Infra(InfraErrorKind::DataCorruption, _)
        ));
    }

    #[test]
    fn mismatched_id_is_data_corruption() {
        let game = lobby();
        let mut row = row_for(&game);
        row.id = uuid::Uuid::new_v4();
        assert!(matches!(
            from_row(row),
            Err(DomainError::Infra(InfraErrorKind::DataCorruption, _))
        ));
    }
}
