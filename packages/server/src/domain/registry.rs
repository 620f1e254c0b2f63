//! Connection Registry
//!
//! 接続中の全ソケットと、そのセッションメタデータ（プレイヤー名・gameId・役割・単語）を
//! 挿入順に保持します。プロセス全体で 1 つのインスタンスを `Arc<Mutex<_>>` で共有し、
//! ユースケースとブロードキャストルーターに明示的に渡します（グローバル変数は使わない）。

use super::{
    entity::Connection,
    round::Round,
    value_object::{ConnectionId, JoinCode},
};

/// Live connections in insertion order
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: Vec<Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a validated connection. Re-attaching the same id replaces its metadata.
    pub fn attach(&mut self, connection: Connection) {
        match self.connections.iter_mut().find(|c| c.id == connection.id) {
            Some(existing) => *existing = connection,
            None => self.connections.push(connection),
        }
    }

    /// Remove a connection. Detaching an unknown id is a no-op.
    pub fn detach(&mut self, id: &ConnectionId) -> Option<Connection> {
        let position = self.connections.iter().position(|c| &c.id == id)?;
        Some(self.connections.remove(position))
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| &c.id == id)
    }

    pub fn get_mut(&mut self, id: &ConnectionId) -> Option<&mut Connection> {
        self.connections.iter_mut().find(|c| &c.id == id)
    }

    /// Connections bound to `game_id`, in registry order.
    pub fn for_game<'a>(&'a self, game_id: &'a JoinCode) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| &c.game_id == game_id)
    }

    pub fn for_game_mut(&mut self, game_id: &JoinCode) -> Vec<&mut Connection> {
        self.connections
            .iter_mut()
            .filter(|c| &c.game_id == game_id)
            .collect()
    }

    /// Rebuild the round of `game_id` from its connections.
    pub fn round(&self, game_id: &JoinCode) -> Round {
        Round::from_members(game_id.clone(), self.for_game(game_id).cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
