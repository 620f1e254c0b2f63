//! UseCase: imposter による単語の推測
//!
//! 推測は imposter の接続に保存された単語と大文字小文字を無視して比較します。
//! 正解ならラウンドを `Resolved` にしてゲーム全体へ通知し、不正解なら推測した
//! 本人にだけ通知します。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, ConnectionRegistry, PlayerName, round},
    infrastructure::dto::websocket::ServerMessage,
};

use super::{broadcast::BroadcastRouter, error::GameError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
}

pub struct GuessWordUseCase {
    registry: Arc<Mutex<ConnectionRegistry>>,
    router: Arc<BroadcastRouter>,
}

impl GuessWordUseCase {
    pub fn new(registry: Arc<Mutex<ConnectionRegistry>>, router: Arc<BroadcastRouter>) -> Self {
        Self { registry, router }
    }

    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        guess: Option<String>,
    ) -> Result<GuessOutcome, GameError> {
        let (guesser, game_id, correct) = {
            let mut registry = self.registry.lock().await;
            let connection = registry.get(connection_id).ok_or_else(|| {
                GameError::Validation("Client not properly registered".to_string())
            })?;
            round::ensure_imposter(connection)?;
            let guess = guess
                .filter(|g| !g.is_empty())
                .ok_or_else(|| GameError::Validation("No guess provided".to_string()))?;
            let correct = round::check_guess(connection, &guess)?;
            let guesser: PlayerName = connection.player_name.clone();
            let game_id = connection.game_id.clone();

            if correct {
                round::resolve(&mut registry.for_game_mut(&game_id));
            }
            (guesser, game_id, correct)
        };

        if correct {
            tracing::info!("Imposter '{}' guessed the word in game '{}'", guesser, game_id);
            let message = format!("{} guessed the word correctly!", guesser);
            self.router
                .broadcast(&game_id, |_| true, |_| ServerMessage::ImposterGuessedCorrectly {
                    message: message.clone(),
                })
                .await;
            return Ok(GuessOutcome::Correct);
        }

        tracing::info!("Imposter '{}' guessed wrong in game '{}'", guesser, game_id);
        let reply = ServerMessage::ImposterGuessIncorrect {
            message: "Incorrect guess. Try again!".to_string(),
        };
        if let Err(e) = self.router.send_to(connection_id, &reply).await {
            tracing::warn!("Failed to notify '{}' of incorrect guess: {}", guesser, e);
        }
        Ok(GuessOutcome::Incorrect)
    }
}
