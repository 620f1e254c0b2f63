//! UseCase: WebSocket 切断処理

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry, MessagePusher};

pub struct DisconnectPlayerUseCase {
    registry: Arc<Mutex<ConnectionRegistry>>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectPlayerUseCase {
    pub fn new(
        registry: Arc<Mutex<ConnectionRegistry>>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 接続を Connection Registry と MessagePusher から取り除く
    ///
    /// 同じ接続に対して複数回呼ばれても安全です。ゲームの記録は変更しません。
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Connection> {
        let removed = self.registry.lock().await.detach(connection_id);
        self.message_pusher.unregister_client(connection_id).await;

        match &removed {
            Some(connection) => tracing::info!(
                "Player '{}' disconnected from game '{}'",
                connection.player_name,
                connection.game_id
            ),
            None => tracing::debug!("Connection '{}' was already detached", connection_id),
        }
        removed
    }
}
