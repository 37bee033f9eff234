//! Error codes for the Contaminados backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Contaminados backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Wrong or missing game password
    Unauthorized,
    /// Only the owner may do this
    NotOwner,
    /// Player is not part of the game
    NotAMember,
    /// Only the round leader may do this
    NotLeader,
    /// Player is not in the proposed group
    NotInGroup,

    // Request Validation
    /// Name/owner length outside 3..=20
    InvalidName,
    /// Player name length outside 3..=20
    InvalidPlayer,
    /// Password length outside 3..=20
    InvalidPassword,
    /// Proposed group is empty
    EmptyGroup,
    /// Group has duplicates or strangers
    InvalidGroup,
    /// Malformed game id
    InvalidGameId,
    /// Malformed round id
    InvalidRoundId,
    /// Missing or malformed header
    InvalidHeader,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Preconditions
    /// Operation not allowed in the current status
    PhaseMismatch,
    /// Game already has the maximum number of players
    GameFull,
    /// Group size does not match the round table
    InvalidGroupSize,
    /// Not enough players to start
    NotEnoughPlayers,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Round not found
    RoundNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Active game with this name exists
    NameTaken,
    /// Player already joined
    PlayerTaken,
    /// Ballot already cast in this attempt
    AlreadyVoted,
    /// Action already submitted this round
    AlreadyActed,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Data corruption detected
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotOwner => "NOT_OWNER",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::NotLeader => "NOT_LEADER",
            Self::NotInGroup => "NOT_IN_GROUP",

            Self::InvalidName => "INVALID_NAME",
            Self::InvalidPlayer => "INVALID_PLAYER",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::EmptyGroup => "EMPTY_GROUP",
            Self::InvalidGroup => "INVALID_GROUP",
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidRoundId => "INVALID_ROUND_ID",
            Self::InvalidHeader => "INVALID_HEADER",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::GameFull => "GAME_FULL",
            Self::InvalidGroupSize => "INVALID_GROUP_SIZE",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::NameTaken => "NAME_TAKEN",
            Self::PlayerTaken => "PLAYER_TAKEN",
            Self::AlreadyVoted => "ALREADY_VOTED",
            Self::AlreadyActed => "ALREADY_ACTED",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
