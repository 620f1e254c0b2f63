//! UseCase errors.
//!
//! Every handler error is one of these kinds. The status code mirrors HTTP and is what
//! clients see in `error` frames and HTTP error responses.

use thiserror::Error;

use crate::domain::{RepositoryError, RoundError, StorageError, ValueObjectError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Role or identity mismatch
    #[error("{0}")]
    Authorization(String),

    /// Unknown game or player
    #[error("{0}")]
    NotFound(String),

    /// Duplicate player name on join
    #[error("{0}")]
    Conflict(String),

    /// Persistence or transport failure
    #[error("{0}")]
    Internal(String),
}

impl GameError {
    pub fn status(&self) -> u16 {
        match self {
            GameError::Validation(_) => 400,
            GameError::Authorization(_) => 403,
            GameError::NotFound(_) => 404,
            GameError::Conflict(_) => 409,
            GameError::Internal(_) => 500,
        }
    }

    /// Map a Session Directory error, naming what was being done when storage failed.
    pub fn from_repository(error: RepositoryError, context: &str) -> Self {
        match error {
            RepositoryError::GameNotFound(_) => GameError::NotFound("Game not found".to_string()),
            RepositoryError::PlayerNotFound { .. } => {
                GameError::NotFound("Player not found in the game".to_string())
            }
            RepositoryError::DuplicatePlayer { .. } | RepositoryError::DuplicateJoinCode(_) => {
                GameError::Conflict(error.to_string())
            }
            RepositoryError::Storage(detail) => {
                tracing::error!("Storage failure while {}: {}", context, detail);
                GameError::Internal(format!("Server error while {}", context))
            }
        }
    }
}

impl From<ValueObjectError> for GameError {
    fn from(error: ValueObjectError) -> Self {
        GameError::Validation(error.to_string())
    }
}

impl From<RoundError> for GameError {
    fn from(error: RoundError) -> Self {
        match error {
            RoundError::NotImposter => GameError::Authorization(error.to_string()),
            RoundError::EmptyRoster | RoundError::NoWordChosen | RoundError::AlreadyResolved => {
                GameError::Validation(error.to_string())
            }
        }
    }
}

impl From<RepositoryError> for GameError {
    fn from(error: RepositoryError) -> Self {
        GameError::from_repository(error, "accessing the session directory")
    }
}

impl From<StorageError> for GameError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::InvalidKey(_) => GameError::Validation(error.to_string()),
            StorageError::Backend(detail) => {
                tracing::error!("Object store failure: {}", detail);
                GameError::Internal("Server error while storing images".to_string())
            }
        }
    }
}
