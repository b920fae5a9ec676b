use serde::{Deserialize, Serialize};

/// Where an object store keeps a given object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageKind {
    S3Compatible {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bucket_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        region: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        allow_http: Option<bool>,
    },
    Filesystem {
        path: String,
    },
    Disabled,
}

/// A key into the object store, qualified by the backend that holds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoragePath {
    pub kind: StorageKind,
    pub path: String,
}

impl StoragePath {
    pub fn new<S: Into<String>>(kind: StorageKind, path: S) -> Self {
        StoragePath {
            kind,
            path: path.into(),
        }
    }

    /// A path on a filesystem-backed store rooted at `root`
    pub fn filesystem<R: Into<String>, S: Into<String>>(root: R, path: S) -> Self {
        Self::new(StorageKind::Filesystem { path: root.into() }, path)
    }
}
