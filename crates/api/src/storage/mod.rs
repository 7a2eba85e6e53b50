// Path: crates/api/src/storage/mod.rs

//! API for the distributed object store holding record and signature files.

use crate::error::StoreError;
use async_trait::async_trait;

/// Reads named blobs from a bucketed object store.
///
/// Implementations must be safe to call concurrently, and a failure for one
/// key must never affect another. Timeouts and retries for a single request
/// belong to the implementation or the caller wrapping it, not to this trait.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches the full content of `key` in `bucket`.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for std::sync::Arc<T> {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        (**self).get_object(bucket, key).await
    }
}
