//! Repository trait 定義
//!
//! Session Directory（ゲームとプレイヤーのドキュメントストア）へのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## キーによる再解決
//!
//! すべての操作は `(join_code, name)` をキーにゲームとプレイヤーを毎回探し直します。
//! 行インデックスをキャッシュすると、並行する退出処理の後で古いインデックスを
//! 参照してしまうため、実装側でもインデックスを保持してはいけません。

use async_trait::async_trait;

use super::{
    entity::{Game, Player, PlayerField},
    error::RepositoryError,
    value_object::{JoinCode, PlayerName},
};

/// Game Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// 新しいゲームを保存（join code が重複している場合はエラー）
    async fn create_game(&self, game: Game) -> Result<(), RepositoryError>;

    /// 全てのゲームを作成順に取得
    async fn list_games(&self) -> Result<Vec<Game>, RepositoryError>;

    /// join code でゲームを取得
    async fn get_game(&self, join_code: &JoinCode) -> Result<Game, RepositoryError>;

    /// ゲーム内のプレイヤーを名前で取得
    async fn find_player(
        &self,
        join_code: &JoinCode,
        name: &PlayerName,
    ) -> Result<Player, RepositoryError>;

    /// プレイヤーを追加し、更新後のゲームを返す
    async fn add_player(&self, join_code: &JoinCode, player: Player)
    -> Result<Game, RepositoryError>;

    /// プレイヤーを削除
    async fn remove_player(
        &self,
        join_code: &JoinCode,
        name: &PlayerName,
    ) -> Result<(), RepositoryError>;

    /// プレイヤーの 1 フィールド（photo / vote）を書き込む
    async fn set_player_field(
        &self,
        join_code: &JoinCode,
        name: &PlayerName,
        field: PlayerField,
    ) -> Result<(), RepositoryError>;
}
