// Path: crates/types/src/app/bundle.rs
//! The portable proof bundle.

use crate::app::{NodeRef, RecordContent};
use crate::error::DecodeError;
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything a verifier needs to check a transaction's record independently:
/// the record content, the address book snapshots (oldest to newest), and the
/// raw signature file of every node whose download succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProofBundleWire", into = "ProofBundleWire")]
pub struct ProofBundle {
    record: RecordContent,
    address_books: Vec<Vec<u8>>,
    signature_files: BTreeMap<NodeRef, Vec<u8>>,
    version: u32,
}

impl ProofBundle {
    /// Assembles a bundle. Snapshots must already be ordered oldest to newest.
    pub fn new(
        record: RecordContent,
        address_books: Vec<Vec<u8>>,
        signature_files: BTreeMap<NodeRef, Vec<u8>>,
        version: u32,
    ) -> Self {
        Self {
            record,
            address_books,
            signature_files,
            version,
        }
    }

    /// The record content.
    pub fn record(&self) -> &RecordContent {
        &self.record
    }

    /// Raw address book snapshots, oldest first.
    pub fn address_books(&self) -> &[Vec<u8>] {
        &self.address_books
    }

    /// Raw signature files keyed by node.
    pub fn signature_files(&self) -> &BTreeMap<NodeRef, Vec<u8>> {
        &self.signature_files
    }

    /// The record stream format version.
    pub fn version(&self) -> u32 {
        self.version
    }
}

/// The JSON wire form of a `ProofBundle`: byte payloads as base64, everything
/// else as plain scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofBundleWire {
    /// Record content, base64.
    pub record_file: String,
    /// Whether `record_file` holds the compact representation.
    #[serde(default)]
    pub compact: bool,
    /// Address book snapshots, base64, oldest first.
    pub address_books: Vec<String>,
    /// Signature files, base64, keyed by node reference.
    pub signature_files: BTreeMap<String, String>,
    /// Record stream format version.
    pub version: u32,
}

fn decode_field(field: &str, value: &str) -> Result<Vec<u8>, DecodeError> {
    B64.decode(value.as_bytes()).map_err(|e| DecodeError::Base64 {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

impl From<ProofBundle> for ProofBundleWire {
    fn from(bundle: ProofBundle) -> Self {
        let compact = bundle.record.is_compact();
        Self {
            record_file: B64.encode(bundle.record.as_bytes()),
            compact,
            address_books: bundle.address_books.iter().map(|b| B64.encode(b)).collect(),
            signature_files: bundle
                .signature_files
                .iter()
                .map(|(node, bytes)| (node.to_string(), B64.encode(bytes)))
                .collect(),
            version: bundle.version,
        }
    }
}

impl TryFrom<ProofBundleWire> for ProofBundle {
    type Error = DecodeError;

    fn try_from(wire: ProofBundleWire) -> Result<Self, Self::Error> {
        let record_bytes = decode_field("record_file", &wire.record_file)?;
        let record = if wire.compact {
            RecordContent::Compact(record_bytes)
        } else {
            RecordContent::Full(record_bytes)
        };
        let address_books = wire
            .address_books
            .iter()
            .enumerate()
            .map(|(i, b)| decode_field(&format!("address_books[{i}]"), b))
            .collect::<Result<Vec<_>, _>>()?;
        let mut signature_files = BTreeMap::new();
        for (node, bytes) in &wire.signature_files {
            let node: NodeRef = node.parse()?;
            let bytes = decode_field(&format!("signature_files[{node}]"), bytes)?;
            signature_files.insert(node, bytes);
        }
        Ok(Self {
            record,
            address_books,
            signature_files,
            version: wire.version,
        })
    }
}
