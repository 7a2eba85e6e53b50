// Path: crates/types/src/app/record.rs
//! Record locators, address book rows and record content.

use crate::app::{b64, NodeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The finalized record file that holds a transaction, as resolved by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusRecordLocator {
    /// Consensus timestamp of the transaction, in nanoseconds.
    pub consensus_timestamp: i64,
    /// Name of the record file in the object store.
    pub file_name: String,
    /// Record stream format version.
    pub version: u32,
    /// The node whose upload of the record file is served.
    pub node: NodeRef,
    /// Record file bytes when the ledger keeps them inline.
    #[serde(default, with = "b64::option", skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<u8>>,
}

/// One address book snapshot as stored by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBookRow {
    /// Consensus timestamp from which the snapshot applies, in nanoseconds.
    pub start_consensus_timestamp: i64,
    /// The serialized `NodeAddressBook`.
    #[serde(with = "b64")]
    pub file_data: Vec<u8>,
    /// The node count recorded alongside the snapshot.
    pub node_count: usize,
    /// The node references the ledger resolved for this snapshot.
    pub nodes: Vec<NodeRef>,
}

/// The kind of object fetched from the store for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// A record stream file.
    RecordFile,
    /// A node's signature file for a record file.
    SignatureFile,
}

impl ArtifactKind {
    /// A stable label, used for metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RecordFile => "record_file",
            Self::SignatureFile => "signature_file",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecordFile => f.write_str("record files"),
            Self::SignatureFile => f.write_str("signature files"),
        }
    }
}

/// The record content carried by a proof bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordContent {
    /// The complete record file.
    Full(Vec<u8>),
    /// A reduced representation produced by the record codec.
    Compact(Vec<u8>),
}

impl RecordContent {
    /// The raw bytes, regardless of representation.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Full(b) | Self::Compact(b) => b,
        }
    }

    /// Whether this is the compact representation.
    pub fn is_compact(&self) -> bool {
        matches!(self, Self::Compact(_))
    }
}
