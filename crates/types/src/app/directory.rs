// Path: crates/types/src/app/directory.rs
//! Node references, keys and the node directory.

use crate::codec::address_book;
use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifies a consensus node.
///
/// A directory record yields `Id` when it carries a non-zero numeric node id
/// and `Memo` otherwise. Memo text made only of digits is read back as `Id`,
/// so both sides always agree on the same reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NodeRef {
    /// A numeric node id.
    Id(u64),
    /// A textual identifier taken from the record memo (e.g. `0.0.3`).
    Memo(String),
}

impl NodeRef {
    /// Builds a reference from a directory record's node id and memo.
    ///
    /// Returns `None` when the record has neither a non-zero id nor a memo.
    pub fn from_record(node_id: i64, memo: &str) -> Option<Self> {
        if node_id > 0 {
            return u64::try_from(node_id).ok().map(Self::Id);
        }
        memo.trim().parse().ok()
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Memo(memo) => f.write_str(memo),
        }
    }
}

impl FromStr for NodeRef {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DecodeError::Empty("node reference"));
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = s.parse::<u64>() {
                if id > 0 {
                    return Ok(Self::Id(id));
                }
            }
        }
        Ok(Self::Memo(s.to_string()))
    }
}

impl TryFrom<String> for NodeRef {
    type Error = DecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeRef> for String {
    fn from(value: NodeRef) -> Self {
        value.to_string()
    }
}

impl From<u64> for NodeRef {
    fn from(value: u64) -> Self {
        Self::Id(value)
    }
}

/// A node's public key material.
#[derive(Clone, PartialEq, Eq)]
pub enum Key {
    /// A single DER-encoded public key.
    Single(Vec<u8>),
    /// A list of keys, any one of which may attest for the node.
    List(Vec<Key>),
}

impl Key {
    /// All single keys, depth first.
    pub fn single_keys(&self) -> Vec<&[u8]> {
        let mut out = Vec::new();
        self.collect_single(&mut out);
        out
    }

    fn collect_single<'a>(&'a self, out: &mut Vec<&'a [u8]>) {
        match self {
            Self::Single(bytes) => out.push(bytes),
            Self::List(keys) => keys.iter().for_each(|k| k.collect_single(out)),
        }
    }

    /// Returns true when no usable key material is present.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(bytes) => bytes.is_empty(),
            Self::List(keys) => keys.iter().all(Key::is_empty),
        }
    }

    /// The protobuf wire encoding of this key.
    pub fn to_wire_bytes(&self) -> Vec<u8> {
        address_book::encode_key(self)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(bytes) => write!(f, "Single({} bytes)", bytes.len()),
            Self::List(keys) => f.debug_list().entries(keys).finish(),
        }
    }
}

/// A node and its public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDirectoryEntry {
    /// The node.
    pub node: NodeRef,
    /// The node's key.
    pub key: Key,
}

/// A decoded address book snapshot: the node roster and each node's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDirectory {
    entries: Vec<NodeDirectoryEntry>,
    index: BTreeMap<NodeRef, usize>,
    declared_node_count: usize,
}

impl NodeDirectory {
    /// Builds a directory, rejecting it when the entry count differs from the
    /// declared node count. A repeated node keeps its first position and takes
    /// the later key.
    pub fn new(
        entries: impl IntoIterator<Item = NodeDirectoryEntry>,
        declared_node_count: usize,
    ) -> Result<Self, DecodeError> {
        let mut out: Vec<NodeDirectoryEntry> = Vec::new();
        let mut index = BTreeMap::new();
        for entry in entries {
            match index.get(&entry.node) {
                Some(&pos) => {
                    if let Some(existing) = out.get_mut(pos) {
                        *existing = entry;
                    }
                }
                None => {
                    index.insert(entry.node.clone(), out.len());
                    out.push(entry);
                }
            }
        }
        if out.len() != declared_node_count {
            return Err(DecodeError::NodeCountMismatch {
                declared: declared_node_count,
                decoded: out.len(),
            });
        }
        Ok(Self {
            entries: out,
            index,
            declared_node_count,
        })
    }

    /// Decodes a serialized `NodeAddressBook`.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        address_book::decode(bytes)
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[NodeDirectoryEntry] {
        &self.entries
    }

    /// The node count the snapshot declares.
    pub fn declared_node_count(&self) -> usize {
        self.declared_node_count
    }

    /// Number of nodes in the directory.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory has no nodes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The key registered for `node`, if any.
    pub fn key_for(&self, node: &NodeRef) -> Option<&Key> {
        self.index
            .get(node)
            .and_then(|&pos| self.entries.get(pos))
            .map(|e| &e.key)
    }

    /// The node references in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRef> {
        self.entries.iter().map(|e| &e.node)
    }

    /// Checks the directory against a node count recorded elsewhere.
    pub fn ensure_node_count(&self, expected: usize) -> Result<(), DecodeError> {
        if self.entries.len() != expected {
            return Err(DecodeError::NodeCountMismatch {
                declared: expected,
                decoded: self.entries.len(),
            });
        }
        Ok(())
    }
}

/// Address book snapshots ordered oldest to newest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDirectoryChain {
    snapshots: Vec<NodeDirectory>,
}

impl NodeDirectoryChain {
    /// Decodes every snapshot, preserving order.
    pub fn decode<B: AsRef<[u8]>>(snapshots: &[B]) -> Result<Self, DecodeError> {
        if snapshots.is_empty() {
            return Err(DecodeError::Empty("node directory chain"));
        }
        let snapshots = snapshots
            .iter()
            .map(|s| NodeDirectory::decode(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { snapshots })
    }

    /// The snapshot in effect: the most recent one.
    pub fn latest(&self) -> Option<&NodeDirectory> {
        self.snapshots.last()
    }

    /// All snapshots, oldest first.
    pub fn snapshots(&self) -> &[NodeDirectory] {
        &self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(node: NodeRef, key: u8) -> NodeDirectoryEntry {
        NodeDirectoryEntry {
            node,
            key: Key::Single(vec![key; 4]),
        }
    }

    #[test]
    fn node_ref_prefers_numeric_id() {
        assert_eq!(NodeRef::from_record(5, "0.0.8"), Some(NodeRef::Id(5)));
        assert_eq!(
            NodeRef::from_record(0, "0.0.8"),
            Some(NodeRef::Memo("0.0.8".to_string()))
        );
        assert_eq!(NodeRef::from_record(0, ""), None);
        assert_eq!("7".parse::<NodeRef>().unwrap(), NodeRef::Id(7));
        assert_eq!(NodeRef::Memo("0.0.3".into()).to_string(), "0.0.3");
    }

    #[test]
    fn duplicate_node_keeps_first_position() {
        let dir = NodeDirectory::new(
            vec![
                entry(NodeRef::Id(1), 1),
                entry(NodeRef::Id(2), 2),
                entry(NodeRef::Id(1), 9),
            ],
            2,
        )
        .unwrap();
        let nodes: Vec<_> = dir.nodes().cloned().collect();
        assert_eq!(nodes, vec![NodeRef::Id(1), NodeRef::Id(2)]);
        assert_eq!(dir.key_for(&NodeRef::Id(1)), Some(&Key::Single(vec![9; 4])));
    }

    #[test]
    fn node_count_check_against_outside_count() {
        let dir = NodeDirectory::new(
            vec![entry(NodeRef::Id(1), 1), entry(NodeRef::Id(2), 2)],
            2,
        )
        .unwrap();
        assert_eq!(dir.ensure_node_count(2), Ok(()));
        assert_eq!(
            dir.ensure_node_count(3),
            Err(DecodeError::NodeCountMismatch {
                declared: 3,
                decoded: 2
            })
        );
    }

    #[test]
    fn key_list_flattens_depth_first() {
        let key = Key::List(vec![
            Key::Single(vec![1]),
            Key::List(vec![Key::Single(vec![2]), Key::Single(vec![3])]),
        ]);
        let singles: Vec<&[u8]> = key.single_keys();
        assert_eq!(singles, vec![&[1u8][..], &[2u8][..], &[3u8][..]]);
        assert!(!key.is_empty());
        assert!(Key::List(vec![]).is_empty());
    }
}
