//! ObjectStore trait 定義
//!
//! アップロードされた画像などのバイナリを保存し、取得可能な URL を返すストレージの
//! インターフェース。

use async_trait::async_trait;

use super::error::StorageError;

/// A stored binary object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key` and return the URL it can be fetched from.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Fetch a stored object.
    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StorageError>;
}
