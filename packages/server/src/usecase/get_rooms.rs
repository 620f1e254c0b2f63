//! UseCase: ゲーム一覧の取得

use std::sync::Arc;

use crate::domain::{Game, GameRepository};

use super::error::GameError;

pub struct GetRoomsUseCase {
    repository: Arc<dyn GameRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn GameRepository>) -> Self {
        Self { repository }
    }

    /// 全てのゲームを作成順に返す
    pub async fn execute(&self) -> Result<Vec<Game>, GameError> {
        self.repository
            .list_games()
            .await
            .map_err(|e| GameError::from_repository(e, "listing games"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::Harness;

    #[tokio::test]
    async fn test_get_rooms_in_creation_order() {
        // テスト項目: 作成順にゲームが返される
        // given (前提条件):
        let harness = Harness::new();
        harness.seed_game("AB12", &["alice"]).await;
        harness.seed_game("CD34", &["bob", "carol"]).await;
        let usecase = GetRoomsUseCase::new(harness.repository.clone());

        // when (操作):
        let games = usecase.execute().await.unwrap();

        // then (期待する結果):
        let codes: Vec<&str> = games.iter().map(|g| g.join_code.as_str()).collect();
        assert_eq!(codes, vec!["AB12", "CD34"]);
        assert_eq!(games[1].players.len(), 2);
    }

    #[tokio::test]
    async fn test_get_rooms_empty() {
        // テスト項目: ゲームがない場合は空の一覧が返される
        // given (前提条件):
        let harness = Harness::new();
        let usecase = GetRoomsUseCase::new(harness.repository.clone());

        // when (操作):
        let games = usecase.execute().await.unwrap();

        // then (期待する結果):
        assert!(games.is_empty());
    }
}
