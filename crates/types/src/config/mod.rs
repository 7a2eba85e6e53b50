// Path: crates/types/src/config/mod.rs

//! Configuration structures for the proof assembly side (`stateproof.toml`).
use serde::{Deserialize, Serialize};

/// Connection settings for the object store holding record and signature files.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ObjectStoreConfig {
    /// Base URL of the store. Objects are read path-style from
    /// `{endpoint}/{bucket}/{key}`.
    pub endpoint: String,
    /// Deadline for each individual object fetch, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Maximum number of fetches in flight for one batch.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_request_timeout_ms() -> u64 {
    20_000
}
fn default_max_concurrency() -> usize {
    64
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://storage.googleapis.com".to_string(),
            request_timeout_ms: default_request_timeout_ms(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

/// How record stream objects are laid out in the bucket.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Prefix of every record stream object, e.g. `recordstreams/`.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    "recordstreams/".to_string()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

/// Top-level configuration for proof assembly.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StateProofConfig {
    /// The bucket holding record stream files.
    pub bucket_name: String,
    /// Object store connection settings.
    #[serde(default)]
    pub object_store: ObjectStoreConfig,
    /// Object key layout.
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Ship the codec's compact record representation when it supports one.
    #[serde(default)]
    pub prefer_compact: bool,
}

impl StateProofConfig {
    /// A configuration with defaults for everything but the bucket.
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            object_store: ObjectStoreConfig::default(),
            layout: LayoutConfig::default(),
            prefer_compact: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_fills_defaults() {
        let cfg: StateProofConfig = toml::from_str(r#"bucket_name = "mainnet-streams""#).unwrap();
        assert_eq!(cfg, StateProofConfig::new("mainnet-streams"));
        assert_eq!(cfg.object_store.request_timeout_ms, 20_000);
        assert_eq!(cfg.layout.prefix, "recordstreams/");
    }

    #[test]
    fn nested_tables_override_defaults() {
        let cfg: StateProofConfig = toml::from_str(
            r#"
            bucket_name = "testnet"
            prefer_compact = true

            [object_store]
            endpoint = "http://localhost:9000"
            max_concurrency = 8

            [layout]
            prefix = "streams/"
            "#,
        )
        .unwrap();
        assert!(cfg.prefer_compact);
        assert_eq!(cfg.object_store.endpoint, "http://localhost:9000");
        assert_eq!(cfg.object_store.max_concurrency, 8);
        assert_eq!(cfg.object_store.request_timeout_ms, 20_000);
        assert_eq!(cfg.layout.prefix, "streams/");
    }
}
