//! UseCase: 写真・投票の提出（Submission Aggregator）
//!
//! 提出値は Session Directory のプレイヤーレコードに保存されます。対象のプレイヤーは
//! 接続の `(gameId, name)` から毎回探し直し、見つからなければ何も書き込みません。
//!
//! 写真の提出後はゲームを読み直し、写真を提出済みのプレイヤー一覧を
//! `server:photosUpdated` としてゲーム全体に送ります。読み直しに失敗した場合は
//! ログを出すだけで、提出者への成功通知は取り消しません。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, ConnectionRegistry, GameRepository, JoinCode, PlayerField, PlayerName},
    infrastructure::dto::{
        conversion::photo_entries,
        websocket::{PhotoEntry, ServerMessage},
    },
};

use super::{broadcast::BroadcastRouter, error::GameError};

/// What the photo broadcast carried
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoSubmission {
    /// Whether `server:photosUpdated` was sent
    pub published: bool,
    pub photos: Vec<PhotoEntry>,
    pub all_submitted: bool,
}

async fn submitter(
    registry: &Mutex<ConnectionRegistry>,
    connection_id: &ConnectionId,
) -> Result<(JoinCode, PlayerName), GameError> {
    let registry = registry.lock().await;
    let connection = registry
        .get(connection_id)
        .ok_or_else(|| GameError::Validation("Missing gameId on connection".to_string()))?;
    Ok((connection.game_id.clone(), connection.player_name.clone()))
}

async fn store(
    repository: &dyn GameRepository,
    game_id: &JoinCode,
    player_name: &PlayerName,
    field: PlayerField,
) -> Result<(), GameError> {
    let context = format!("storing {}", field.name());
    repository
        .find_player(game_id, player_name)
        .await
        .map_err(|e| GameError::from_repository(e, &context))?;
    repository
        .set_player_field(game_id, player_name, field)
        .await
        .map_err(|e| GameError::from_repository(e, &context))
}

pub struct SubmitPhotoUseCase {
    repository: Arc<dyn GameRepository>,
    registry: Arc<Mutex<ConnectionRegistry>>,
    router: Arc<BroadcastRouter>,
}

impl SubmitPhotoUseCase {
    pub fn new(
        repository: Arc<dyn GameRepository>,
        registry: Arc<Mutex<ConnectionRegistry>>,
        router: Arc<BroadcastRouter>,
    ) -> Self {
        Self {
            repository,
            registry,
            router,
        }
    }

    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        photo: Option<String>,
    ) -> Result<PhotoSubmission, GameError> {
        let photo = photo
            .filter(|p| !p.is_empty())
            .ok_or_else(|| GameError::Validation("Photo URL is required".to_string()))?;
        let (game_id, player_name) = submitter(&self.registry, connection_id).await?;

        store(
            self.repository.as_ref(),
            &game_id,
            &player_name,
            PlayerField::Photo(photo),
        )
        .await?;
        tracing::info!("Player '{}' submitted a photo in game '{}'", player_name, game_id);

        let ack = ServerMessage::PhotoSubmitted {
            status: "200".to_string(),
            message: "Photo submitted successfully".to_string(),
        };
        if let Err(e) = self.router.send_to(connection_id, &ack).await {
            tracing::warn!("Failed to acknowledge photo of '{}': {}", player_name, e);
        }

        let game = match self.repository.get_game(&game_id).await {
            Ok(game) => game,
            Err(e) => {
                tracing::error!("Error broadcasting photos for game '{}': {}", game_id, e);
                return Ok(PhotoSubmission::default());
            }
        };
        let photos = photo_entries(&game);
        let all_submitted = game.all_photos_submitted();
        self.router
            .broadcast(&game_id, |_| true, |c| ServerMessage::PhotosUpdated {
                game_id: c.game_id.to_string(),
                photos: photos.clone(),
            })
            .await;
        if all_submitted {
            tracing::info!("All players have submitted photos for game '{}'", game_id);
        }

        Ok(PhotoSubmission {
            published: true,
            photos,
            all_submitted,
        })
    }
}

pub struct SubmitVoteUseCase {
    repository: Arc<dyn GameRepository>,
    registry: Arc<Mutex<ConnectionRegistry>>,
    router: Arc<BroadcastRouter>,
}

impl SubmitVoteUseCase {
    pub fn new(
        repository: Arc<dyn GameRepository>,
        registry: Arc<Mutex<ConnectionRegistry>>,
        router: Arc<BroadcastRouter>,
    ) -> Self {
        Self {
            repository,
            registry,
            router,
        }
    }

    /// 投票を保存し、投票者にだけ確認を返す
    ///
    /// 投票先がゲームのプレイヤーかどうかは検証しません。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        vote: Option<String>,
    ) -> Result<(), GameError> {
        let vote = vote
            .filter(|v| !v.is_empty())
            .ok_or_else(|| GameError::Validation("Vote is required".to_string()))?;
        let (game_id, player_name) = submitter(&self.registry, connection_id).await?;

        store(
            self.repository.as_ref(),
            &game_id,
            &player_name,
            PlayerField::Vote(vote),
        )
        .await?;
        tracing::info!("Player '{}' voted in game '{}'", player_name, game_id);

        let ack = ServerMessage::VoteSubmitted {
            status: "200".to_string(),
            message: "Vote submitted successfully".to_string(),
        };
        if let Err(e) = self.router.send_to(connection_id, &ack).await {
            tracing::warn!("Failed to acknowledge vote of '{}': {}", player_name, e);
        }
        Ok(())
    }
}
