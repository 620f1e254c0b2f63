//! InMemory ObjectStore 実装

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ObjectStore, StorageError, StoredObject};

/// Route prefix under which stored objects are served
pub const OBJECTS_ROUTE_PREFIX: &str = "/objects";

/// Keeps objects in memory; URLs point back at this server's `/objects` route.
pub struct InMemoryObjectStore {
    public_url: String,
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
}

impl InMemoryObjectStore {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            public_url: public_url.into().trim_end_matches('/').to_string(),
            objects: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}{}/{}", self.public_url, OBJECTS_ROUTE_PREFIX, key)
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.split('/').any(|segment| segment.is_empty() || segment == "..");
    if invalid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        validate_key(key)?;
        let size = bytes.len();
        let mut objects = self.objects.lock().await;
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        tracing::debug!("Stored object '{}' ({} bytes, {})", key, size, content_type);
        Ok(self.url_for(key))
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StorageError> {
        validate_key(key)?;
        let objects = self.objects.lock().await;
        Ok(objects.get(key).cloned())
    }
}
