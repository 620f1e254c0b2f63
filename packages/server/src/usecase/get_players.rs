//! UseCase: ゲームのプレイヤー一覧の取得

use std::sync::Arc;

use crate::domain::{GameRepository, JoinCode, Player};

use super::error::GameError;

pub struct GetPlayersUseCase {
    repository: Arc<dyn GameRepository>,
}

impl GetPlayersUseCase {
    pub fn new(repository: Arc<dyn GameRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, join_code: String) -> Result<Vec<Player>, GameError> {
        let join_code = JoinCode::new(join_code)?;
        let game = self
            .repository
            .get_game(&join_code)
            .await
            .map_err(|e| GameError::from_repository(e, "fetching players"))?;
        Ok(game.players)
    }
}
