// Path: crates/types/src/app/consensus.rs
//! Signature artifacts, retrieval outcomes, consensus results and the quorum rule.

use crate::app::NodeRef;
use crate::error::StoreError;
use crate::HASH_SIZE;
use serde::{Serialize, Serializer};
use std::fmt;

/// A SHA-384 record file hash as signed by the nodes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileHash(pub [u8; HASH_SIZE]);

impl FileHash {
    /// Builds a hash from a slice, which must be exactly `HASH_SIZE` bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; HASH_SIZE]>::try_from(bytes).ok().map(Self)
    }

    /// The raw digest.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl fmt::Debug for FileHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileHash({})", hex::encode(self.0))
    }
}

impl fmt::Display for FileHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for FileHash {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(self.0))
    }
}

/// A node's decoded signature file: the hash it attests to and its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureArtifact {
    /// The signing node.
    pub node: NodeRef,
    /// The record file hash the node signed.
    pub hash: FileHash,
    /// The signature over `hash`.
    pub signature: Vec<u8>,
}

/// The outcome of fetching one key. A batch always yields one per key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalOutcome<K, T> {
    /// The key that was requested.
    pub key: K,
    /// The fetched value or the failure for this key alone.
    pub result: Result<T, StoreError>,
}

/// Returns true when `actual` corroborating nodes out of `total` satisfy the
/// one-third rule, i.e. `actual >= ceil(total / 3)`.
///
/// An empty node set never reaches quorum.
pub fn can_reach_quorum(actual: usize, total: usize) -> bool {
    total > 0 && actual >= total.div_ceil(3)
}

/// The verdict of verifying a proof bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusResult {
    /// The hash with the most valid signatures, when quorum was reached.
    pub winning_hash: Option<FileHash>,
    /// Number of nodes whose valid signatures support the winning hash.
    pub supporting_nodes: usize,
    /// Number of nodes in the directory in effect.
    pub total_nodes: usize,
    /// Whether the winning hash met the one-third rule.
    pub quorum_reached: bool,
    /// Whether the winning hash equals the record content hash.
    pub hash_matches: bool,
}

impl ConsensusResult {
    /// A proof holds only when quorum was reached and the content hash matches.
    pub fn is_valid(&self) -> bool {
        self.quorum_reached && self.hash_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_third_rule() {
        assert!(can_reach_quorum(1, 3));
        assert!(can_reach_quorum(2, 4));
        assert!(!can_reach_quorum(1, 4));
        assert!(can_reach_quorum(3, 7));
        assert!(!can_reach_quorum(2, 7));
        assert!(!can_reach_quorum(0, 0));
    }

    #[test]
    fn file_hash_requires_exact_length() {
        assert!(FileHash::from_slice(&[0u8; HASH_SIZE]).is_some());
        assert!(FileHash::from_slice(&[0u8; HASH_SIZE - 1]).is_none());
    }
}
