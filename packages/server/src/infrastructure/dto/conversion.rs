//! Conversion logic between DTOs and domain entities.

use imposter_shared::time::timestamp_to_rfc3339;

use crate::domain::entity;
use crate::infrastructure::dto::{http, websocket};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::Player> for http::PlayerDto {
    fn from(model: entity::Player) -> Self {
        Self {
            name: model.name.into_string(),
            score: model.score,
            game: model.game.into_string(),
            photo: model.photo,
            vote: model.vote,
        }
    }
}

impl From<entity::Game> for http::GameDto {
    fn from(model: entity::Game) -> Self {
        Self {
            join_code: model.join_code.into_string(),
            host_name: model.host_name.into_string(),
            room_name: model.room_name,
            status: model.status,
            players: model.players.into_iter().map(Into::into).collect(),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

impl From<&entity::Game> for http::RoomSummaryDto {
    fn from(model: &entity::Game) -> Self {
        Self {
            join_code: model.join_code.as_str().to_string(),
            room_name: model.room_name.clone(),
            host_name: model.host_name.as_str().to_string(),
            status: model.status.clone(),
            players: model
                .players
                .iter()
                .map(|p| p.name.as_str().to_string())
                .collect(),
        }
    }
}

/// `server:photosUpdated` entries for every player with a non-empty photo
pub fn photo_entries(game: &entity::Game) -> Vec<websocket::PhotoEntry> {
    game.submitted_photos()
        .into_iter()
        .map(|(name, photo)| websocket::PhotoEntry {
            name: name.into_string(),
            photo,
        })
        .collect()
}
