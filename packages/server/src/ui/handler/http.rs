//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    infrastructure::dto::http::{
        CreateRoomRequest, ErrorResponse, GameDto, MessageResponse, PlayerDto, PlayerNameQuery,
        RoomSummaryDto, UploadResponse,
    },
    ui::state::AppState,
    usecase::{GameError, ImageUpload},
};

/// Multipart field carrying uploaded images
const IMAGES_FIELD: &str = "images";

/// `GameError` as an HTTP response
pub struct ApiError(GameError);

impl From<GameError> for ApiError {
    fn from(error: GameError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

pub async fn index() -> &'static str {
    "Imposter game server is running"
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List rooms in creation order
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoomSummaryDto>>, ApiError> {
    let games = state.get_rooms_usecase.execute().await?;
    Ok(Json(games.iter().map(RoomSummaryDto::from).collect()))
}

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<GameDto>), ApiError> {
    let game = state
        .create_room_usecase
        .execute(request.host_name, request.room_name)
        .await?;
    Ok((StatusCode::CREATED, Json(GameDto::from(game))))
}

pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(query): Query<PlayerNameQuery>,
) -> Result<Json<GameDto>, ApiError> {
    let game = state.join_room_usecase.execute(code, query.name).await?;
    Ok(Json(GameDto::from(game)))
}

pub async fn get_players(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Vec<PlayerDto>>, ApiError> {
    let players = state.get_players_usecase.execute(code).await?;
    Ok(Json(players.into_iter().map(PlayerDto::from).collect()))
}

pub async fn leave_room(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(query): Query<PlayerNameQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.leave_room_usecase.execute(code, query.name).await?;
    Ok(Json(MessageResponse {
        message: "Player has left the game".to_string(),
    }))
}

pub async fn upload_images(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut images = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Invalid multipart body for game '{}': {}", code, e);
                return Err(GameError::Validation(format!("Invalid multipart body: {}", e)).into());
            }
        };
        if field.name() != Some(IMAGES_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| GameError::Validation(format!("Invalid multipart body: {}", e)))?;
        images.push(ImageUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    let urls = state.upload_images_usecase.execute(code, images).await?;
    Ok(Json(UploadResponse { urls }))
}

/// Serve an object stored by the object store
pub async fn get_object(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let object = state.get_object_usecase.execute(&key).await?;
    Ok(([(header::CONTENT_TYPE, object.content_type)], object.bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status() {
        // テスト項目: GameError の種別が HTTP ステータスに変換される
        // given (前提条件):
        let errors = [
            GameError::Validation("bad".into()),
            GameError::NotFound("Game not found".into()),
            GameError::Conflict("taken".into()),
        ];

        // when (操作):
        let statuses: Vec<StatusCode> = errors
            .into_iter()
            .map(|e| ApiError::from(e).into_response().status())
            .collect();

        // then (期待する結果):
        assert_eq!(
            statuses,
            vec![
                StatusCode::BAD_REQUEST,
                StatusCode::NOT_FOUND,
                StatusCode::CONFLICT
            ]
        );
    }
}
