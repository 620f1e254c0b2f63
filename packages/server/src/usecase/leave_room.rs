//! UseCase: ゲームからの退出
//!
//! プレイヤーレコードだけを削除します。開いている WebSocket 接続はそのまま残り、
//! 切断されるまでブロードキャストを受け取り続けます。

use std::sync::Arc;

use crate::domain::{GameRepository, JoinCode, PlayerName};

use super::error::GameError;

pub struct LeaveRoomUseCase {
    repository: Arc<dyn GameRepository>,
}

impl LeaveRoomUseCase {
    pub fn new(repository: Arc<dyn GameRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        join_code: String,
        player_name: Option<String>,
    ) -> Result<(), GameError> {
        let Some(player_name) = player_name.filter(|v| !v.is_empty()) else {
            return Err(GameError::Validation(
                "Game code and player name are required".to_string(),
            ));
        };
        let join_code = JoinCode::new(join_code)?;
        let player_name = PlayerName::new(player_name)?;

        self.repository
            .remove_player(&join_code, &player_name)
            .await
            .map_err(|e| GameError::from_repository(e, "leaving the game"))?;
        tracing::info!("Player '{}' left game '{}'", player_name, join_code);
        Ok(())
    }
}
