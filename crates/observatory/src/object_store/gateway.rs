use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

use super::ObjectStore;
use crate::errors::{ObjectStoreError, ObjectStoreResult};
use crate::models::storage::StoragePath;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches objects through the gateway's object storage endpoint
pub struct GatewayObjectStore {
    client: Client,
    base_url: String,
}

impl GatewayObjectStore {
    pub fn new(base_url: &str, timeout: Duration) -> ObjectStoreResult<Self> {
        Url::parse(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn object_url(&self) -> String {
        format!("{}/internal/object_storage", self.base_url)
    }
}

#[async_trait]
impl ObjectStore for GatewayObjectStore {
    async fn get_object(&self, storage_path: &StoragePath) -> ObjectStoreResult<String> {
        let encoded = serde_json::to_string(storage_path)?;
        tracing::debug!(path = %storage_path.path, "fetching object from gateway");

        let response = self
            .client
            .get(self.object_url())
            .query(&[("storage_path", encoded)])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.text().await?),
            StatusCode::NOT_FOUND => Err(ObjectStoreError::NotFound(storage_path.path.clone())),
            status => Err(ObjectStoreError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}
