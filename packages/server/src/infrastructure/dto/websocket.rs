//! WebSocket message DTOs.
//!
//! One JSON object per text frame, discriminated by its `type` field.

use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// Inbound client messages
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "client:startGame")]
    StartGame {},
    #[serde(rename = "client:submitPhoto")]
    SubmitPhoto {
        #[serde(default)]
        photo: Option<String>,
    },
    #[serde(rename = "client:guessWord")]
    GuessWord {
        #[serde(default)]
        guess: Option<String>,
    },
    #[serde(rename = "client:submitVote")]
    SubmitVote {
        #[serde(default)]
        vote: Option<String>,
    },
    /// Any `type` this server does not handle
    #[serde(other)]
    Unknown,
}

/// One entry of a `server:photosUpdated` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEntry {
    pub name: String,
    pub photo: String,
}

/// Outbound server messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "welcome")]
    Welcome { message: String },
    #[serde(rename = "error")]
    Error { status: String, error: String },
    #[serde(rename = "server:gameStarted", rename_all = "camelCase")]
    GameStarted {
        game_id: String,
        player_name: String,
        role: Role,
        in_game: bool,
    },
    #[serde(rename = "server:wordChosen")]
    WordChosen { word: String },
    #[serde(rename = "server:photoSubmitted")]
    PhotoSubmitted { status: String, message: String },
    #[serde(rename = "server:photosUpdated", rename_all = "camelCase")]
    PhotosUpdated {
        game_id: String,
        photos: Vec<PhotoEntry>,
    },
    #[serde(rename = "server:imposterGuessedCorrectly")]
    ImposterGuessedCorrectly { message: String },
    #[serde(rename = "server:imposterGuessIncorrect")]
    ImposterGuessIncorrect { message: String },
    #[serde(rename = "server:voteSubmitted")]
    VoteSubmitted { status: String, message: String },
}

impl ServerMessage {
    pub fn error(status: u16, error: impl Into<String>) -> Self {
        ServerMessage::Error {
            status: status.to_string(),
            error: error.into(),
        }
    }

    /// Wire name of this message
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::Welcome { .. } => "welcome",
            ServerMessage::Error { .. } => "error",
            ServerMessage::GameStarted { .. } => "server:gameStarted",
            ServerMessage::WordChosen { .. } => "server:wordChosen",
            ServerMessage::PhotoSubmitted { .. } => "server:photoSubmitted",
            ServerMessage::PhotosUpdated { .. } => "server:photosUpdated",
            ServerMessage::ImposterGuessedCorrectly { .. } => "server:imposterGuessedCorrectly",
            ServerMessage::ImposterGuessIncorrect { .. } => "server:imposterGuessIncorrect",
            ServerMessage::VoteSubmitted { .. } => "server:voteSubmitted",
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
