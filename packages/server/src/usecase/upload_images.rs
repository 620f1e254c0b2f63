//! UseCase: ゲームへの画像アップロード
//!
//! 画像を ObjectStore に保存し、取得用 URL の一覧を返します。保存先のキーは
//! `{joinCode}/{uuid}-{ファイル名}` です。URL は提出（client:submitPhoto）に使われます。

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{GameRepository, JoinCode, ObjectStore};

use super::error::GameError;

/// One uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

pub struct UploadImagesUseCase {
    repository: Arc<dyn GameRepository>,
    object_store: Arc<dyn ObjectStore>,
}

impl UploadImagesUseCase {
    pub fn new(repository: Arc<dyn GameRepository>, object_store: Arc<dyn ObjectStore>) -> Self {
        Self {
            repository,
            object_store,
        }
    }

    /// 全ての画像を検証してから保存し、アップロード順に URL を返す
    pub async fn execute(
        &self,
        join_code: String,
        images: Vec<ImageUpload>,
    ) -> Result<Vec<String>, GameError> {
        let join_code = JoinCode::new(join_code)?;
        self.repository
            .get_game(&join_code)
            .await
            .map_err(|e| GameError::from_repository(e, "uploading images"))?;

        if images.is_empty() {
            return Err(GameError::Validation("No images provided".to_string()));
        }
        for image in &images {
            let content_type = image.content_type.as_deref().unwrap_or_default();
            if !content_type.starts_with("image/") {
                return Err(GameError::Validation(format!(
                    "Unsupported content type: '{}'",
                    content_type
                )));
            }
        }

        let mut urls = Vec::with_capacity(images.len());
        for image in images {
            let key = format!(
                "{}/{}-{}",
                join_code,
                Uuid::new_v4(),
                sanitize_file_name(image.file_name.as_deref())
            );
            let content_type = image.content_type.unwrap_or_default();
            urls.push(self.object_store.put(&key, image.bytes, &content_type).await?);
        }
        tracing::info!("Uploaded {} image(s) to game '{}'", urls.len(), join_code);
        Ok(urls)
    }
}

/// Keep a file name usable as a single key segment.
fn sanitize_file_name(file_name: Option<&str>) -> String {
    let sanitized: String = file_name
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        "image".to_string()
    } else {
        sanitized
    }
}
