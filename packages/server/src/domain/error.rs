//! Domain errors.

use thiserror::Error;

/// Value object construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} must not have leading or trailing whitespace")]
    SurroundingWhitespace { field: &'static str },
}

/// Session Directory errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Game '{0}' not found")]
    GameNotFound(String),

    #[error("Player '{player}' not found in game '{game}'")]
    PlayerNotFound { game: String, player: String },

    #[error("Join code '{0}' is already in use")]
    DuplicateJoinCode(String),

    #[error("Player '{player}' already joined game '{game}'")]
    DuplicatePlayer { game: String, player: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Outbound message delivery errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Connection '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}

/// Object store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Invalid object key: '{0}'")]
    InvalidKey(String),

    #[error("Object store failure: {0}")]
    Backend(String),
}

/// Round state machine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("Cannot start a round without players")]
    EmptyRoster,

    #[error("Only the imposter can make guesses")]
    NotImposter,

    #[error("No word has been chosen for this round yet")]
    NoWordChosen,

    #[error("The round is already resolved")]
    AlreadyResolved,
}
