// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind, PreconditionKind,
    ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_400() {
    let de = DomainError::validation(ValidationKind::EmptyGroup, "group cannot be empty");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::EmptyGroup);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_unauthorized_to_401() {
    let app: AppError = DomainError::unauthorized("incorrect password").into();
    assert_eq!(app.code(), ErrorCode::Unauthorized);
    assert_eq!(app.status().as_u16(), 401);
}

#[test]
fn maps_forbidden_kinds() {
    for (kind, code) in [
        (ForbiddenKind::NotOwner, ErrorCode::NotOwner),
        (ForbiddenKind::NotAMember, ErrorCode::NotAMember),
        (ForbiddenKind::NotLeader, ErrorCode::NotLeader),
        (ForbiddenKind::NotInGroup, ErrorCode::NotInGroup),
    ] {
        let app: AppError = DomainError::forbidden(kind, "no").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 403);
    }
}

#[test]
fn maps_conflicts() {
    let voted = DomainError::conflict(ConflictKind::AlreadyVoted, "already voted");
    let app: AppError = voted.into();
    assert_eq!(app.code().as_str(), "ALREADY_VOTED");
    assert_eq!(app.status().as_u16(), 409);

    let lock = DomainError::conflict(ConflictKind::OptimisticLock, "stale");
    let app: AppError = lock.into();
    assert_eq!(app.code().as_str(), "OPTIMISTIC_LOCK");
    assert_eq!(app.status().as_u16(), 409);

    // Test generic conflict fallback
    let other = DomainError::conflict(
        ConflictKind::Other("some conflict".to_string()),
        "generic conflict",
    );
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::Round, "no round").into();
    assert_eq!(app.code().as_str(), "ROUND_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_preconditions_to_428() {
    for (kind, code) in [
        (PreconditionKind::CapacityExceeded, ErrorCode::GameFull),
        (PreconditionKind::GroupSize, ErrorCode::InvalidGroupSize),
        (PreconditionKind::NotEnoughPlayers, ErrorCode::NotEnoughPlayers),
    ] {
        let app: AppError = DomainError::precondition(kind, "not yet").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 428);
    }
}

#[test]
fn maps_infra() {
    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "bad doc").into();
    assert_eq!(app.code(), ErrorCode::DataCorruption);
    assert_eq!(app.status().as_u16(), 500);

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.code(), ErrorCode::DbUnavailable);
}
