//! Broadcast Router
//!
//! Connection Registry の中から gameId と述語で宛先を選び、接続ごとに生成した
//! メッセージを MessagePusher 経由で送信します。
//!
//! - 宛先のトランスポートが開いていない場合はスキップします（エラーにしない）
//! - 1 つの宛先への送信失敗は warn ログを出して残りの宛先への送信を続けます

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{Connection, ConnectionId, ConnectionRegistry, JoinCode, MessagePushError, MessagePusher},
    infrastructure::dto::websocket::ServerMessage,
};

pub struct BroadcastRouter {
    registry: Arc<Mutex<ConnectionRegistry>>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastRouter {
    pub fn new(
        registry: Arc<Mutex<ConnectionRegistry>>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Send a per-recipient message to every connection of `game_id` matching `predicate`.
    ///
    /// Recipients are snapshotted from the registry before anything is sent.
    /// Returns the number of connections the message was handed to.
    pub async fn broadcast<P, F>(&self, game_id: &JoinCode, predicate: P, factory: F) -> usize
    where
        P: Fn(&Connection) -> bool,
        F: Fn(&Connection) -> ServerMessage,
    {
        let recipients: Vec<Connection> = {
            let registry = self.registry.lock().await;
            registry
                .for_game(game_id)
                .filter(|c| predicate(*c))
                .cloned()
                .collect()
        };
        self.deliver(&recipients, factory).await
    }

    /// Send a per-recipient message to an already selected set of connections.
    pub async fn deliver<F>(&self, recipients: &[Connection], factory: F) -> usize
    where
        F: Fn(&Connection) -> ServerMessage,
    {
        let mut delivered = 0;
        for connection in recipients {
            if !self.message_pusher.is_open(&connection.id).await {
                tracing::debug!(
                    "Skipping '{}' ({}): connection is not open",
                    connection.player_name,
                    connection.id
                );
                continue;
            }

            let message = factory(connection);
            match self.send_to(&connection.id, &message).await {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(
                    "Failed to send {} to '{}': {}",
                    message.kind(),
                    connection.player_name,
                    e
                ),
            }
        }
        delivered
    }

    /// Send one message to one connection.
    pub async fn send_to(
        &self,
        connection_id: &ConnectionId,
        message: &ServerMessage,
    ) -> Result<(), MessagePushError> {
        let json = message
            .to_json()
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        self.message_pusher.push_to(connection_id, &json).await
    }
}
