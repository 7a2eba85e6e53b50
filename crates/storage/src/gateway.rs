// Path: crates/storage/src/gateway.rs

//! Fans out per-node object fetches and reports one outcome per node.

use futures::stream::{self, StreamExt};
use stateproof_api::storage::ObjectStore;
use stateproof_telemetry::fetch_metrics;
use stateproof_types::app::{ArtifactKind, NodeRef, RetrievalOutcome};
use stateproof_types::config::{LayoutConfig, StateProofConfig};
use stateproof_types::error::{ErrorCode, StoreError};
use std::time::{Duration, Instant};

/// Maps (node, record file) pairs to object keys.
///
/// Record files live at `{prefix}record{node}/{file}` and the node's
/// signature file for it at `{prefix}record{node}/{file}_sig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKeyLayout {
    prefix: String,
}

impl ObjectKeyLayout {
    /// A layout rooted at `prefix`, which is used verbatim.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Key of the record file `file_name` as served by `node`.
    pub fn record_file(&self, node: &NodeRef, file_name: &str) -> String {
        format!("{}record{}/{}", self.prefix, node, file_name)
    }

    /// Key of `node`'s signature file for the record file `file_name`.
    pub fn signature_file(&self, node: &NodeRef, file_name: &str) -> String {
        format!("{}_sig", self.record_file(node, file_name))
    }

    /// Key of the artifact of `kind` for `file_name` at `node`.
    pub fn key(&self, kind: ArtifactKind, node: &NodeRef, file_name: &str) -> String {
        match kind {
            ArtifactKind::RecordFile => self.record_file(node, file_name),
            ArtifactKind::SignatureFile => self.signature_file(node, file_name),
        }
    }
}

impl From<&LayoutConfig> for ObjectKeyLayout {
    fn from(config: &LayoutConfig) -> Self {
        Self::new(config.prefix.clone())
    }
}

/// Retrieves record and signature files from an [`ObjectStore`].
///
/// Each fetch carries its own deadline. Batches never fail as a whole: a
/// timeout, a missing object or an empty object is reported for that node
/// alone.
pub struct ObjectGateway<S> {
    store: S,
    bucket: String,
    layout: ObjectKeyLayout,
    request_timeout: Duration,
    max_concurrency: usize,
}

impl<S: ObjectStore> ObjectGateway<S> {
    /// A gateway reading from `config.bucket_name` with the configured
    /// layout, deadline and concurrency bound.
    pub fn new(store: S, config: &StateProofConfig) -> Self {
        Self {
            store,
            bucket: config.bucket_name.clone(),
            layout: ObjectKeyLayout::from(&config.layout),
            request_timeout: Duration::from_millis(config.object_store.request_timeout_ms),
            max_concurrency: config.object_store.max_concurrency.max(1),
        }
    }

    /// Fetches one node's artifact for `file_name`.
    pub async fn fetch(
        &self,
        kind: ArtifactKind,
        node: &NodeRef,
        file_name: &str,
    ) -> Result<Vec<u8>, StoreError> {
        let key = self.layout.key(kind, node, file_name);
        let started = Instant::now();
        let result = match tokio::time::timeout(
            self.request_timeout,
            self.store.get_object(&self.bucket, &key),
        )
        .await
        {
            Ok(Ok(bytes)) if bytes.is_empty() => Err(StoreError::Empty { key: key.clone() }),
            Ok(res) => res,
            Err(_) => Err(StoreError::Timeout {
                key: key.clone(),
                millis: u64::try_from(self.request_timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        };

        let metrics = fetch_metrics();
        metrics.observe_fetch_duration(kind.as_str(), started.elapsed().as_secs_f64());
        match &result {
            Ok(bytes) => {
                metrics.inc_objects_fetched(kind.as_str(), "ok");
                metrics.inc_bytes_fetched(bytes.len() as u64);
                tracing::debug!(target: "storage", %node, %key, bytes = bytes.len(), "fetched object");
            }
            Err(e) => {
                metrics.inc_objects_fetched(kind.as_str(), e.code());
                tracing::warn!(target: "storage", %node, %key, error = %e, "failed to fetch object");
            }
        }
        result
    }

    /// Fetches `kind` for every node in `nodes`, at most `max_concurrency` at a time.
    ///
    /// Returns exactly one outcome per requested node, in request order.
    pub async fn fetch_many(
        &self,
        kind: ArtifactKind,
        nodes: &[NodeRef],
        file_name: &str,
    ) -> Vec<RetrievalOutcome<NodeRef, Vec<u8>>> {
        let mut outcomes: Vec<(usize, RetrievalOutcome<NodeRef, Vec<u8>>)> =
            stream::iter(nodes.iter().enumerate())
                .map(|(idx, node)| async move {
                    let result = self.fetch(kind, node, file_name).await;
                    (
                        idx,
                        RetrievalOutcome {
                            key: node.clone(),
                            result,
                        },
                    )
                })
                .buffer_unordered(self.max_concurrency)
                .collect()
                .await;
        outcomes.sort_by_key(|(idx, _)| *idx);
        outcomes.into_iter().map(|(_, outcome)| outcome).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryObjectStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    fn config() -> StateProofConfig {
        let mut cfg = StateProofConfig::new("streams");
        cfg.object_store.request_timeout_ms = 50;
        cfg.object_store.max_concurrency = 2;
        cfg
    }

    #[test]
    fn layout_builds_record_and_signature_keys() {
        let layout = ObjectKeyLayout::new("recordstreams/");
        let node = NodeRef::Id(3);
        assert_eq!(
            layout.record_file(&node, "2021-01-01T00_00_00Z.rcd"),
            "recordstreams/record3/2021-01-01T00_00_00Z.rcd"
        );
        assert_eq!(
            layout.signature_file(&NodeRef::Memo("0.0.4".into()), "a.rcd"),
            "recordstreams/record0.0.4/a.rcd_sig"
        );
        assert_eq!(
            layout.key(ArtifactKind::SignatureFile, &node, "a.rcd"),
            layout.signature_file(&node, "a.rcd")
        );
    }

    #[tokio::test]
    async fn fetch_many_reports_every_node_in_order() {
        let store = Arc::new(MemoryObjectStore::new());
        let layout = ObjectKeyLayout::from(&LayoutConfig::default());
        for id in [1u64, 3] {
            store.restore(
                "streams",
                layout.signature_file(&NodeRef::Id(id), "f.rcd"),
                vec![id as u8],
            );
        }
        store.restore("streams", layout.signature_file(&NodeRef::Id(4), "f.rcd"), Vec::new());

        let gateway = ObjectGateway::new(store, &config());
        let nodes: Vec<NodeRef> = (1..=4).map(NodeRef::Id).collect();
        let outcomes = gateway
            .fetch_many(ArtifactKind::SignatureFile, &nodes, "f.rcd")
            .await;

        assert_eq!(outcomes.len(), 4);
        let keys: Vec<_> = outcomes.iter().map(|o| o.key.clone()).collect();
        assert_eq!(keys, nodes);
        assert_eq!(outcomes[0].result, Ok(vec![1]));
        assert!(matches!(outcomes[1].result, Err(StoreError::NotFound { .. })));
        assert_eq!(outcomes[2].result, Ok(vec![3]));
        assert!(matches!(outcomes[3].result, Err(StoreError::Empty { .. })));
    }

    struct StallingStore;

    #[async_trait]
    impl ObjectStore for StallingStore {
        async fn get_object(&self, _bucket: &str, _key: &str) -> Result<Vec<u8>, StoreError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(vec![1])
        }
    }

    #[tokio::test]
    async fn fetch_times_out_per_request() {
        let gateway = ObjectGateway::new(StallingStore, &config());
        let err = gateway
            .fetch(ArtifactKind::RecordFile, &NodeRef::Id(3), "f.rcd")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::Timeout {
                key: "recordstreams/record3/f.rcd".into(),
                millis: 50
            }
        );
    }
}
