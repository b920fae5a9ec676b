use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::ObjectStore;
use crate::errors::{ObjectStoreError, ObjectStoreResult};
use crate::models::storage::StoragePath;

/// Reads objects from a local directory, for deployments that keep images on disk
pub struct FilesystemObjectStore {
    root: PathBuf,
}

impl FilesystemObjectStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Objects are only ever read from below the root
    fn object_path(&self, path: &str) -> ObjectStoreResult<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if path.is_empty() || escapes {
            return Err(ObjectStoreError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn get_object(&self, storage_path: &StoragePath) -> ObjectStoreResult<String> {
        let full_path = self.object_path(&storage_path.path)?;
        tracing::debug!(path = %full_path.display(), "reading object from filesystem");

        match tokio::fs::read_to_string(&full_path).await {
            Ok(object) => Ok(object),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ObjectStoreError::NotFound(storage_path.path.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
