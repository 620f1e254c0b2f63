//! InMemory Game Repository 実装
//!
//! ドメイン層が定義する GameRepository trait の具体的な実装。
//! ゲームを作成順の `Vec` に保持し、すべての操作で join code とプレイヤー名から
//! 対象を探し直します。
//!
//! スナップショットパスが指定されている場合、変更のたびにゲーム一覧全体を
//! JSON ファイルに書き出し、起動時に読み込みます。耐久性は保証しません。

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{
    Game, GameRepository, JoinCode, Player, PlayerField, PlayerName, RepositoryError,
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    games: Vec<Game>,
}

/// インメモリ Game Repository 実装
pub struct InMemoryGameRepository {
    /// 作成順のゲーム一覧
    games: Arc<Mutex<Vec<Game>>>,
    /// JSON スナップショットの保存先
    snapshot_path: Option<PathBuf>,
}

impl InMemoryGameRepository {
    /// 新しい InMemoryGameRepository を作成
    pub fn new(games: Arc<Mutex<Vec<Game>>>) -> Self {
        Self {
            games,
            snapshot_path: None,
        }
    }

    /// JSON スナップショットから復元し、以降の変更を同じファイルに書き出す
    ///
    /// ファイルが存在しない場合は空の状態から開始します。
    pub async fn with_snapshot(path: PathBuf) -> Result<Self, RepositoryError> {
        let snapshot = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str::<Snapshot>(&content)
                .map_err(|e| RepositoryError::Storage(format!("invalid snapshot: {}", e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(RepositoryError::Storage(e.to_string())),
        };
        tracing::info!(
            "Loaded {} game(s) from snapshot {}",
            snapshot.games.len(),
            path.display()
        );

        Ok(Self {
            games: Arc::new(Mutex::new(snapshot.games)),
            snapshot_path: Some(path),
        })
    }

    async fn persist(&self, games: &[Game]) -> Result<(), RepositoryError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(&Snapshot {
            games: games.to_vec(),
        })
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        tokio::fs::write(path, content).await.map_err(|e| {
            tracing::error!("Failed to write snapshot {}: {}", path.display(), e);
            RepositoryError::Storage(e.to_string())
        })
    }

    /// 書き出しに成功した場合のみ `next` を現在の状態として反映する
    async fn commit(
        &self,
        games: &mut MutexGuard<'_, Vec<Game>>,
        next: Vec<Game>,
    ) -> Result<(), RepositoryError> {
        self.persist(&next).await?;
        **games = next;
        Ok(())
    }
}

fn game_index(games: &[Game], join_code: &JoinCode) -> Result<usize, RepositoryError> {
    games
        .iter()
        .position(|g| &g.join_code == join_code)
        .ok_or_else(|| RepositoryError::GameNotFound(join_code.as_str().to_string()))
}

fn player_index(game: &Game, name: &PlayerName) -> Result<usize, RepositoryError> {
    game.players
        .iter()
        .position(|p| &p.name == name)
        .ok_or_else(|| RepositoryError::PlayerNotFound {
            game: game.join_code.as_str().to_string(),
            player: name.as_str().to_string(),
        })
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn create_game(&self, game: Game) -> Result<(), RepositoryError> {
        let mut games = self.games.lock().await;
        if games.iter().any(|g| g.join_code == game.join_code) {
            return Err(RepositoryError::DuplicateJoinCode(
                game.join_code.as_str().to_string(),
            ));
        }
        let mut next = games.clone();
        next.push(game);
        self.commit(&mut games, next).await
    }

    async fn list_games(&self) -> Result<Vec<Game>, RepositoryError> {
        let games = self.games.lock().await;
        Ok(games.clone())
    }

    async fn get_game(&self, join_code: &JoinCode) -> Result<Game, RepositoryError> {
        let games = self.games.lock().await;
        let index = game_index(&games, join_code)?;
        Ok(games[index].clone())
    }

    async fn find_player(
        &self,
        join_code: &JoinCode,
        name: &PlayerName,
    ) -> Result<Player, RepositoryError> {
        let games = self.games.lock().await;
        let game = &games[game_index(&games, join_code)?];
        let index = player_index(game, name)?;
        Ok(game.players[index].clone())
    }

    async fn add_player(
        &self,
        join_code: &JoinCode,
        player: Player,
    ) -> Result<Game, RepositoryError> {
        let mut games = self.games.lock().await;
        let index = game_index(&games, join_code)?;
        if games[index].find_player(&player.name).is_some() {
            return Err(RepositoryError::DuplicatePlayer {
                game: join_code.as_str().to_string(),
                player: player.name.into_string(),
            });
        }
        let mut next = games.clone();
        next[index].players.push(player);
        let updated = next[index].clone();
        self.commit(&mut games, next).await?;
        Ok(updated)
    }

    async fn remove_player(
        &self,
        join_code: &JoinCode,
        name: &PlayerName,
    ) -> Result<(), RepositoryError> {
        let mut games = self.games.lock().await;
        let index = game_index(&games, join_code)?;
        let player = player_index(&games[index], name)?;
        let mut next = games.clone();
        next[index].players.remove(player);
        self.commit(&mut games, next).await
    }

    async fn set_player_field(
        &self,
        join_code: &JoinCode,
        name: &PlayerName,
        field: PlayerField,
    ) -> Result<(), RepositoryError> {
        let mut games = self.games.lock().await;
        let index = game_index(&games, join_code)?;
        let player = player_index(&games[index], name)?;
        let mut next = games.clone();
        field.apply(&mut next[index].players[player]);
        self.commit(&mut games, next).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryGameRepository の基本的な CRUD 操作
    // - join code / プレイヤー名によるキー解決
    // - JSON スナップショットへの書き出しと復元
    //
    // 【どのようなシナリオをテストするか】
    // 1. ゲーム作成と取得、join code の重複
    // 2. プレイヤー追加（重複名の拒否）と削除
    // 3. フィールド書き込み（存在しないゲーム / プレイヤー）
    // 4. 削除後に別プレイヤーのフィールドを書き込んでもキーで正しく解決される
    // 5. スナップショットの往復
    // 6. スナップショットの書き出しに失敗した変更は反映されない
    // ========================================

    fn code(value: &str) -> JoinCode {
        JoinCode::new(value.to_string()).unwrap()
    }

    fn name(value: &str) -> PlayerName {
        PlayerName::new(value.to_string()).unwrap()
    }

    fn game(join_code: &str, host: &str) -> Game {
        Game::new(code(join_code), name(host), "room".to_string(), Timestamp::new(0))
    }

    fn create_test_repository() -> InMemoryGameRepository {
        InMemoryGameRepository::new(Arc::new(Mutex::new(Vec::new())))
    }

    #[tokio::test]
    async fn test_create_and_get_game() {
        // テスト項目: 作成したゲームを join code で取得できる
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        repo.create_game(game("AB12", "alice")).await.unwrap();
        let result = repo.get_game(&code("AB12")).await;

        // then (期待する結果):
        let stored = result.unwrap();
        assert_eq!(stored.host_name, name("alice"));
        assert_eq!(stored.players.len(), 1);
    }

    #[tokio::test]
    async fn test_create_game_rejects_duplicate_join_code() {
        // テスト項目: 同じ join code のゲームは作成できない
        // given (前提条件):
        let repo = create_test_repository();
        repo.create_game(game("AB12", "alice")).await.unwrap();

        // when (操作):
        let result = repo.create_game(game("AB12", "bob")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::DuplicateJoinCode("AB12".to_string()))
        );
    }

    #[tokio::test]
    async fn test_get_unknown_game() {
        // テスト項目: 存在しないゲームの取得は GameNotFound になる
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        let result = repo.get_game(&code("NOPE")).await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::GameNotFound("NOPE".to_string())));
    }

    #[tokio::test]
    async fn test_add_player_rejects_duplicate_name() {
        // テスト項目: 同じゲームに同じ名前で参加できない
        // given (前提条件):
        let repo = create_test_repository();
        repo.create_game(game("AB12", "alice")).await.unwrap();
        repo.add_player(&code("AB12"), Player::new(name("bob"), code("AB12")))
            .await
            .unwrap();

        // when (操作):
        let result = repo
            .add_player(&code("AB12"), Player::new(name("bob"), code("AB12")))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::DuplicatePlayer { .. })));
        assert_eq!(repo.get_game(&code("AB12")).await.unwrap().players.len(), 2);
    }

    #[tokio::test]
    async fn test_set_player_field_resolves_by_key_after_removal() {
        // テスト項目: 先行するプレイヤーが退出しても、名前で正しいプレイヤーに書き込まれる
        // given (前提条件):
        let repo = create_test_repository();
        repo.create_game(game("AB12", "alice")).await.unwrap();
        repo.add_player(&code("AB12"), Player::new(name("bob"), code("AB12")))
            .await
            .unwrap();
        repo.add_player(&code("AB12"), Player::new(name("carol"), code("AB12")))
            .await
            .unwrap();
        repo.remove_player(&code("AB12"), &name("bob")).await.unwrap();

        // when (操作):
        repo.set_player_field(
            &code("AB12"),
            &name("carol"),
            PlayerField::Photo("https://img/carol.png".to_string()),
        )
        .await
        .unwrap();

        // then (期待する結果):
        let carol = repo.find_player(&code("AB12"), &name("carol")).await.unwrap();
        assert_eq!(carol.photo.as_deref(), Some("https://img/carol.png"));
        let alice = repo.find_player(&code("AB12"), &name("alice")).await.unwrap();
        assert_eq!(alice.photo, None);
    }

    #[tokio::test]
    async fn test_set_player_field_unknown_player() {
        // テスト項目: 存在しないプレイヤーへの書き込みは PlayerNotFound になる
        // given (前提条件):
        let repo = create_test_repository();
        repo.create_game(game("AB12", "alice")).await.unwrap();

        // when (操作):
        let result = repo
            .set_player_field(&code("AB12"), &name("ghost"), PlayerField::Vote("alice".into()))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::PlayerNotFound {
                game: "AB12".to_string(),
                player: "ghost".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_remove_unknown_player() {
        // テスト項目: 存在しないプレイヤーの削除は PlayerNotFound になる
        // given (前提条件):
        let repo = create_test_repository();
        repo.create_game(game("AB12", "alice")).await.unwrap();

        // when (操作):
        let result = repo.remove_player(&code("AB12"), &name("ghost")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::PlayerNotFound { .. })));
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        // テスト項目: スナップショットに書き出した内容が再起動後に復元される
        // given (前提条件):
        let path = std::env::temp_dir().join(format!(
            "imposter-snapshot-{}.json",
            uuid::Uuid::new_v4()
        ));
        let repo = InMemoryGameRepository::with_snapshot(path.clone())
            .await
            .unwrap();
        repo.create_game(game("AB12", "alice")).await.unwrap();
        repo.set_player_field(&code("AB12"), &name("alice"), PlayerField::Vote("bob".into()))
            .await
            .unwrap();

        // when (操作):
        let restored = InMemoryGameRepository::with_snapshot(path.clone())
            .await
            .unwrap();

        // then (期待する結果):
        let alice = restored
            .find_player(&code("AB12"), &name("alice"))
            .await
            .unwrap();
        assert_eq!(alice.vote.as_deref(), Some("bob"));

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_failed_snapshot_write_leaves_state_unchanged() {
        // テスト項目: スナップショットの書き出しに失敗した変更はメモリ上にも残らない
        // given (前提条件):
        let dir = std::env::temp_dir().join(format!("imposter-missing-{}", uuid::Uuid::new_v4()));
        let path = dir.join("snapshot.json");
        let repo = InMemoryGameRepository::with_snapshot(path.clone())
            .await
            .unwrap();

        // when (操作):
        let created = repo.create_game(game("AB12", "alice")).await;

        // then (期待する結果):
        assert!(matches!(created, Err(RepositoryError::Storage(_))));
        assert_eq!(
            repo.get_game(&code("AB12")).await,
            Err(RepositoryError::GameNotFound("AB12".to_string()))
        );
        assert!(repo.list_games().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_snapshot_write_keeps_previous_player_fields() {
        // テスト項目: 書き出しに失敗したフィールド書き込み / 参加 / 退出は元の状態を保つ
        // given (前提条件):
        let dir = std::env::temp_dir().join(format!("imposter-snapshot-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir(&dir).unwrap();
        let path = dir.join("snapshot.json");
        let repo = InMemoryGameRepository::with_snapshot(path.clone())
            .await
            .unwrap();
        repo.create_game(game("AB12", "alice")).await.unwrap();
        std::fs::remove_file(&path).unwrap();
        std::fs::remove_dir(&dir).unwrap();

        // when (操作):
        let photo = repo
            .set_player_field(&code("AB12"), &name("alice"), PlayerField::Photo("u".into()))
            .await;
        let joined = repo
            .add_player(&code("AB12"), Player::new(name("bob"), code("AB12")))
            .await;
        let left = repo.remove_player(&code("AB12"), &name("alice")).await;

        // then (期待する結果):
        assert!(matches!(photo, Err(RepositoryError::Storage(_))));
        assert!(matches!(joined, Err(RepositoryError::Storage(_))));
        assert!(matches!(left, Err(RepositoryError::Storage(_))));
        let stored = repo.get_game(&code("AB12")).await.unwrap();
        assert_eq!(stored.players.len(), 1);
        assert_eq!(stored.players[0].name, name("alice"));
        assert_eq!(stored.players[0].photo, None);
    }
}
