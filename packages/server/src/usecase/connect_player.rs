//! UseCase: WebSocket 接続の検証と登録
//!
//! ハンドシェイクのクエリ（name, gameId）を Session Directory と照合し、
//! 登録済みのプレイヤーだけを Connection Registry に追加します。

use std::sync::Arc;

use imposter_shared::time::now_millis;
use tokio::sync::Mutex;

use crate::domain::{
    Connection, ConnectionId, ConnectionRegistry, GameRepository, JoinCode, MessagePusher,
    PlayerName, PusherChannel, RepositoryError, Timestamp,
};

use super::error::GameError;

pub struct ConnectPlayerUseCase {
    repository: Arc<dyn GameRepository>,
    registry: Arc<Mutex<ConnectionRegistry>>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectPlayerUseCase {
    pub fn new(
        repository: Arc<dyn GameRepository>,
        registry: Arc<Mutex<ConnectionRegistry>>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            registry,
            message_pusher,
        }
    }

    /// 接続を検証し、成功すれば MessagePusher と Connection Registry に登録する
    ///
    /// # Returns
    ///
    /// * `Ok(Connection)` - 登録された接続（role = unknown, inGame = false）
    /// * `Err(GameError)` - 400（クエリ不足）/ 404（ゲームなし）/ 403（未参加）/ 500
    pub async fn execute(
        &self,
        player_name: Option<String>,
        game_id: Option<String>,
        sender: PusherChannel,
    ) -> Result<Connection, GameError> {
        let (Some(player_name), Some(game_id)) = (
            player_name.filter(|v| !v.is_empty()),
            game_id.filter(|v| !v.is_empty()),
        ) else {
            return Err(GameError::Validation(
                "Query parameters 'name' and 'gameId' are required".to_string(),
            ));
        };
        let player_name = PlayerName::new(player_name)?;
        let game_id = JoinCode::new(game_id)?;

        let game = self
            .repository
            .get_game(&game_id)
            .await
            .map_err(|e| match e {
                RepositoryError::Storage(detail) => {
                    tracing::error!("Error validating player '{}': {}", player_name, detail);
                    GameError::Internal("Server error during validation".to_string())
                }
                other => GameError::from(other),
            })?;
        if !game.is_member(&player_name) {
            return Err(GameError::Authorization(
                "Player not registered in this game. Please join the game first.".to_string(),
            ));
        }

        let connection = Connection::new(
            ConnectionId::generate(),
            player_name,
            game_id,
            Timestamp::new(now_millis()),
        );
        // the channel must be registered before the connection becomes a broadcast target
        self.message_pusher
            .register_client(connection.id, sender)
            .await;
        self.registry.lock().await.attach(connection.clone());

        tracing::info!(
            "Player '{}' connected to game '{}' ({})",
            connection.player_name,
            connection.game_id,
            connection.id
        );
        Ok(connection)
    }
}
