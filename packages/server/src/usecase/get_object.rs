//! UseCase: アップロード済みオブジェクトの取得

use std::sync::Arc;

use crate::domain::{ObjectStore, StoredObject};

use super::error::GameError;

pub struct GetObjectUseCase {
    object_store: Arc<dyn ObjectStore>,
}

impl GetObjectUseCase {
    pub fn new(object_store: Arc<dyn ObjectStore>) -> Self {
        Self { object_store }
    }

    pub async fn execute(&self, key: &str) -> Result<StoredObject, GameError> {
        self.object_store
            .get(key)
            .await?
            .ok_or_else(|| GameError::NotFound("Object not found".to_string()))
    }
}
