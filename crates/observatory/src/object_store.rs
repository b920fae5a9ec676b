use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::ObjectStoreResult;
use crate::models::storage::StoragePath;

pub mod filesystem;
pub mod gateway;

/// Key-addressed blob fetch backing stored image content
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the raw object stored at `storage_path`
    async fn get_object(&self, storage_path: &StoragePath) -> ObjectStoreResult<String>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for Arc<T> {
    async fn get_object(&self, storage_path: &StoragePath) -> ObjectStoreResult<String> {
        (**self).get_object(storage_path).await
    }
}
