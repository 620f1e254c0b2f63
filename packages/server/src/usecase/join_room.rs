//! UseCase: ゲームへの参加

use std::sync::Arc;

use crate::domain::{Game, GameRepository, JoinCode, Player, PlayerName, RepositoryError};

use super::error::GameError;

pub struct JoinRoomUseCase {
    repository: Arc<dyn GameRepository>,
}

impl JoinRoomUseCase {
    pub fn new(repository: Arc<dyn GameRepository>) -> Self {
        Self { repository }
    }

    /// プレイヤーをゲームに追加し、更新後のゲームを返す
    ///
    /// 同じ名前のプレイヤーが既にいる場合は 409 になります。
    pub async fn execute(
        &self,
        join_code: String,
        player_name: Option<String>,
    ) -> Result<Game, GameError> {
        let Some(player_name) = player_name.filter(|v| !v.is_empty()) else {
            return Err(GameError::Validation(
                "Game code and player name are required".to_string(),
            ));
        };
        let join_code = JoinCode::new(join_code)?;
        let player_name = PlayerName::new(player_name)?;

        let game = self
            .repository
            .add_player(&join_code, Player::new(player_name.clone(), join_code.clone()))
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicatePlayer { .. } => GameError::Conflict(
                    "Player name already taken in this game".to_string(),
                ),
                other => GameError::from_repository(other, "joining the game"),
            })?;

        tracing::info!("Player '{}' joined game '{}'", player_name, join_code);
        Ok(game)
    }
}
