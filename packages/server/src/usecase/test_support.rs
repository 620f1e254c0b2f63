//! ユースケースのテストで共有するセットアップ

use std::{collections::HashMap, sync::Arc};

use imposter_shared::time::now_millis;
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{
        Connection, ConnectionId, ConnectionRegistry, Game, GameRepository, JoinCode,
        MessagePusher, Player, PlayerName, Timestamp,
    },
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryGameRepository},
};

use super::BroadcastRouter;

/// In-memory collaborators wired the way the server wires them
pub(crate) struct Harness {
    pub registry: Arc<Mutex<ConnectionRegistry>>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub repository: Arc<InMemoryGameRepository>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(ConnectionRegistry::new())),
            pusher: Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
                HashMap::new(),
            )))),
            repository: Arc::new(InMemoryGameRepository::new(Arc::new(Mutex::new(Vec::new())))),
        }
    }

    pub fn router(&self) -> Arc<BroadcastRouter> {
        Arc::new(BroadcastRouter::new(
            self.registry.clone(),
            self.pusher.clone(),
        ))
    }

    /// Create a game hosted by the first name, with the rest joined.
    pub async fn seed_game(&self, code: &str, names: &[&str]) -> Game {
        let join_code = code_of(code);
        let game = Game::new(
            join_code.clone(),
            name_of(names[0]),
            "Test Room".to_string(),
            Timestamp::new(now_millis()),
        );
        self.repository.create_game(game).await.unwrap();
        let mut game = self.repository.get_game(&join_code).await.unwrap();
        for name in &names[1..] {
            game = self
                .repository
                .add_player(&join_code, Player::new(name_of(name), join_code.clone()))
                .await
                .unwrap();
        }
        game
    }

    /// Attach a connection and register its outbound channel.
    pub async fn connect(
        &self,
        name: &str,
        code: &str,
    ) -> (Connection, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection = Connection::new(
            ConnectionId::generate(),
            name_of(name),
            code_of(code),
            Timestamp::new(now_millis()),
        );
        self.pusher.register_client(connection.id, tx).await;
        self.registry.lock().await.attach(connection.clone());
        (connection, rx)
    }

    pub async fn connection(&self, id: &ConnectionId) -> Option<Connection> {
        self.registry.lock().await.get(id).cloned()
    }
}

pub(crate) fn code_of(value: &str) -> JoinCode {
    JoinCode::new(value.to_string()).unwrap()
}

pub(crate) fn name_of(value: &str) -> PlayerName {
    PlayerName::new(value.to_string()).unwrap()
}

/// Every frame queued on `rx` so far, parsed as JSON
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<serde_json::Value> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(serde_json::from_str(&frame).unwrap());
    }
    frames
}
