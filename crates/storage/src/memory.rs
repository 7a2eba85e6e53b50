// Path: crates/storage/src/memory.rs

//! An in-process object store.

use async_trait::async_trait;
use dashmap::DashMap;
use stateproof_api::storage::ObjectStore;
use stateproof_types::error::StoreError;
use std::io;
use std::path::Path;

/// Objects held in memory, keyed by `(bucket, key)`.
///
/// `get` and `restore` are the whole contract. Callers seed the store up
/// front, or lay a cache over a remote store by restoring what they fetch.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: DashMap<(String, String), Vec<u8>>,
}

impl MemoryObjectStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the object at `key`, if present.
    pub fn get(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|entry| entry.value().clone())
    }

    /// Stores `bytes` under `key`, replacing any previous content.
    pub fn restore(&self, bucket: impl Into<String>, key: impl Into<String>, bytes: Vec<u8>) {
        self.objects.insert((bucket.into(), key.into()), bytes);
    }

    /// Number of stored objects across all buckets.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no object is stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Restores every file under `root` into `bucket`, keyed by its path
    /// relative to `root` with `/` separators. Returns the number of objects.
    pub fn load_directory(&self, bucket: &str, root: &Path) -> io::Result<usize> {
        let mut pending = vec![root.to_path_buf()];
        let mut loaded = 0;
        while let Some(dir) = pending.pop() {
            for entry in std::fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                    continue;
                }
                let Ok(relative) = path.strip_prefix(root) else {
                    continue;
                };
                let key = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                self.restore(bucket, key, std::fs::read(&path)?);
                loaded += 1;
            }
        }
        tracing::debug!(target: "storage", bucket, root = %root.display(), loaded, "loaded object directory");
        Ok(loaded)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        self.get(bucket, key).ok_or_else(|| StoreError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}
