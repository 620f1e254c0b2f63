//! UseCase: ラウンド開始
//!
//! 送信者と同じ gameId の接続を roster とし、1 人を imposter に、残りを crewmate に
//! 割り当てて単語を選びます。役割の割り当てと単語の保存は Registry のロックを
//! 保持したまま行うため、gameStarted を受け取った時点で全員の状態は確定しています。
//!
//! ## 送信順序
//!
//! 1. roster 全員に `server:gameStarted`（各自の役割）
//! 2. crewmate にのみ `server:wordChosen`
//!
//! ラウンド中に再度 startGame を受け取った場合は役割と単語を引き直します。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{
        Connection, ConnectionId, ConnectionRegistry, JoinCode, PlayerName, RandomSource,
        RoundError, RoundPhase, pick_word, round,
    },
    infrastructure::dto::websocket::ServerMessage,
};

use super::{broadcast::BroadcastRouter, error::GameError};

/// Result of a started round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStarted {
    pub game_id: JoinCode,
    pub imposter: PlayerName,
    pub word: String,
    pub roster: Vec<PlayerName>,
}

pub struct StartGameUseCase {
    registry: Arc<Mutex<ConnectionRegistry>>,
    router: Arc<BroadcastRouter>,
    random: Arc<dyn RandomSource>,
}

impl StartGameUseCase {
    pub fn new(
        registry: Arc<Mutex<ConnectionRegistry>>,
        router: Arc<BroadcastRouter>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            registry,
            router,
            random,
        }
    }

    pub async fn execute(&self, connection_id: &ConnectionId) -> Result<RoundStarted, GameError> {
        let (game_id, roster, word) = {
            let mut registry = self.registry.lock().await;
            let game_id = registry
                .get(connection_id)
                .map(|c| c.game_id.clone())
                .ok_or_else(|| {
                    GameError::Validation("Client not properly registered".to_string())
                })?;

            let previous = registry.round(&game_id).phase;
            // 配信はロック解放後に行うため、同時に再開始すると前のラウンドの
            // gameStarted / wordChosen が後から届くことがある
            if previous != RoundPhase::Waiting {
                tracing::warn!(
                    "Restarting game '{}' from {:?}: roles and word are reshuffled",
                    game_id,
                    previous
                );
            }

            let mut members = registry.for_game_mut(&game_id);
            let imposter_index = self.random.index(members.len());
            round::assign_roles(&mut members, imposter_index)?;
            let word = pick_word(self.random.as_ref());
            round::distribute_word(&mut members, word);

            let roster: Vec<Connection> = members.iter().map(|c| (**c).clone()).collect();
            (game_id, roster, word)
        };

        let imposter = roster
            .iter()
            .find(|c| c.is_imposter())
            .map(|c| c.player_name.clone())
            .ok_or(RoundError::EmptyRoster)?;
        tracing::info!("Starting game '{}' with {} player(s)", game_id, roster.len());
        tracing::info!("Chosen word for game '{}': {}", game_id, word);

        self.router
            .deliver(&roster, |c| ServerMessage::GameStarted {
                game_id: c.game_id.to_string(),
                player_name: c.player_name.to_string(),
                role: c.role,
                in_game: c.in_game,
            })
            .await;

        let crewmates: Vec<Connection> =
            roster.iter().filter(|c| c.is_crewmate()).cloned().collect();
        self.router
            .deliver(&crewmates, |_| ServerMessage::WordChosen {
                word: word.to_string(),
            })
            .await;

        Ok(RoundStarted {
            game_id,
            imposter,
            word: word.to_string(),
            roster: roster.into_iter().map(|c| c.player_name).collect(),
        })
    }
}
