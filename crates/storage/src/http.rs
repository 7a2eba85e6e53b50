// Path: crates/storage/src/http.rs

//! Reads objects from a path-style HTTP object store.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use stateproof_api::storage::ObjectStore;
use stateproof_types::config::ObjectStoreConfig;
use stateproof_types::error::StoreError;
use std::time::Duration;

/// An [`ObjectStore`] that issues `GET {endpoint}/{bucket}/{key}`.
///
/// Request signing and provider credentials are left to a fronting proxy;
/// this client only speaks plain HTTP(S).
#[derive(Clone, Debug)]
pub struct HttpObjectStore {
    endpoint: String,
    client: Client,
}

impl HttpObjectStore {
    /// A store reading from `config.endpoint` with the configured request timeout.
    pub fn new(config: &ObjectStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| StoreError::Backend(format!("failed to build http client: {e}")))?;
        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, bucket, key.trim_start_matches('/'))
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let url = self.object_url(bucket, key);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("GET {url}: {e}")))?;

        match resp.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            status if !status.is_success() => {
                Err(StoreError::Backend(format!("GET {url}: HTTP {status}")))
            }
            _ => resp
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(|e| StoreError::Backend(format!("GET {url}: {e}"))),
        }
    }
}
