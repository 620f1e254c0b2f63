//! UseCase: ゲーム（ルーム）の作成
//!
//! ホストを最初のプレイヤーとしてゲームを作成します。join code はランダムに生成し、
//! 既存のゲームと衝突した場合は生成し直します。

use std::sync::Arc;

use imposter_shared::time::now_millis;

use crate::domain::{Game, GameRepository, JoinCode, PlayerName, RandomSource, RepositoryError, Timestamp};

use super::error::GameError;

/// Attempts before giving up on finding an unused join code
const MAX_JOIN_CODE_ATTEMPTS: usize = 8;

pub struct CreateRoomUseCase {
    repository: Arc<dyn GameRepository>,
    random: Arc<dyn RandomSource>,
}

impl CreateRoomUseCase {
    pub fn new(repository: Arc<dyn GameRepository>, random: Arc<dyn RandomSource>) -> Self {
        Self { repository, random }
    }

    pub async fn execute(
        &self,
        host_name: Option<String>,
        room_name: Option<String>,
    ) -> Result<Game, GameError> {
        let (Some(host_name), Some(room_name)) = (
            host_name.filter(|v| !v.is_empty()),
            room_name.filter(|v| !v.trim().is_empty()),
        ) else {
            return Err(GameError::Validation(
                "hostName and roomName are required".to_string(),
            ));
        };
        let host_name = PlayerName::new(host_name)?;

        for _ in 0..MAX_JOIN_CODE_ATTEMPTS {
            let game = Game::new(
                JoinCode::generate(self.random.as_ref()),
                host_name.clone(),
                room_name.clone(),
                Timestamp::new(now_millis()),
            );
            match self.repository.create_game(game.clone()).await {
                Ok(()) => {
                    tracing::info!(
                        "Game '{}' ({}) created by '{}'",
                        game.join_code,
                        game.room_name,
                        game.host_name
                    );
                    return Ok(game);
                }
                Err(RepositoryError::DuplicateJoinCode(code)) => {
                    tracing::debug!("Join code '{}' is taken, generating another", code);
                }
                Err(e) => return Err(GameError::from_repository(e, "creating the game")),
            }
        }

        tracing::error!(
            "Could not allocate a join code after {} attempts",
            MAX_JOIN_CODE_ATTEMPTS
        );
        Err(GameError::Internal(
            "Server error while creating the game".to_string(),
        ))
    }
}
