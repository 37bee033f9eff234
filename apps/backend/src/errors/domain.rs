//! Domain-level error type used across the game rules, services and stores.
//!
//! This error type is HTTP- and DB-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Malformed input rejected at the boundary or by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidName,
    InvalidPlayer,
    InvalidPassword,
    EmptyGroup,
    InvalidGroup,
    InvalidGameId,
    InvalidRoundId,
    Other(String),
}

/// Authenticated but not entitled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ForbiddenKind {
    NotOwner,
    NotAMember,
    NotLeader,
    NotInGroup,
}

/// Semantic conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    NameTaken,
    PlayerTaken,
    AlreadyVoted,
    AlreadyActed,
    OptimisticLock,
    Other(String),
}

/// Requirements that are not met yet; the caller may retry differently.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PreconditionKind {
    /// Operation not allowed in the current game or round status.
    WrongPhase,
    CapacityExceeded,
    GroupSize,
    NotEnoughPlayers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Round,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    Validation(ValidationKind, String),
    /// Wrong or missing password.
    Unauthorized(String),
    Forbidden(ForbiddenKind, String),
    Conflict(ConflictKind, String),
    NotFound(NotFoundKind, String),
    PreconditionFailed(PreconditionKind, String),
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Unauthorized(d) => write!(f, "unauthorized: {d}"),
            DomainError::Forbidden(kind, d) => write!(f, "forbidden {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::PreconditionFailed(kind, d) => {
                write!(f, "precondition failed {kind:?}: {d}")
            }
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::Unauthorized(detail.into())
    }
    pub fn forbidden(kind: ForbiddenKind, detail: impl Into<String>) -> Self {
        Self::Forbidden(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn precondition(kind: PreconditionKind, detail: impl Into<String>) -> Self {
        Self::PreconditionFailed(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Shorthand for the most common precondition failure.
    pub fn wrong_phase(detail: impl Into<String>) -> Self {
        Self::PreconditionFailed(PreconditionKind::WrongPhase, detail.into())
    }

    pub fn is_optimistic_lock(&self) -> bool {
        matches!(self, Self::Conflict(ConflictKind::OptimisticLock, _))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e {
            sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
                DomainError::infra(InfraErrorKind::DbUnavailable, e.to_string())
            }
            sea_orm::DbErr::RecordNotFound(detail) => {
                DomainError::not_found(NotFoundKind::Game, detail)
            }
            other => DomainError::infra(InfraErrorKind::Other("db".into()), other.to_string()),
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("game document does not decode: {e}"),
        )
    }
}
