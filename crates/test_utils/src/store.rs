// Path: crates/test_utils/src/store.rs
//! An object store wrapper that fails or stalls chosen keys.

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use stateproof_api::storage::ObjectStore;
use stateproof_types::error::StoreError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Wraps a store, failing every key that contains a registered fragment and
/// delaying keys with a registered stall.
pub struct FlakyObjectStore<S> {
    inner: S,
    failing: DashSet<String>,
    stalls: DashMap<String, Duration>,
    calls: AtomicUsize,
}

impl<S: ObjectStore> FlakyObjectStore<S> {
    /// Wraps `inner`; every key is served normally until configured otherwise.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failing: DashSet::new(),
            stalls: DashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every key containing `fragment` with a backend error.
    pub fn fail_keys_containing(&self, fragment: impl Into<String>) {
        self.failing.insert(fragment.into());
    }

    /// Delay every key containing `fragment` by `delay` before reading it.
    pub fn stall_keys_containing(&self, fragment: impl Into<String>, delay: Duration) {
        self.stalls.insert(fragment.into(), delay);
    }

    /// Number of `get_object` calls seen so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: ObjectStore> ObjectStore for FlakyObjectStore<S> {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let stall = self
            .stalls
            .iter()
            .find(|entry| key.contains(entry.key().as_str()))
            .map(|entry| *entry.value());
        if let Some(delay) = stall {
            tokio::time::sleep(delay).await;
        }
        if self.failing.iter().any(|f| key.contains(f.as_str())) {
            return Err(StoreError::Backend(format!("injected failure for {key}")));
        }
        self.inner.get_object(bucket, key).await
    }
}
