// Path: crates/test_utils/src/fixtures/mod.rs
//! Deterministic consensus node fixtures.
//!
//! Node keys are RSA-1024 and generated once per test binary from fixed
//! seeds, so every test sees the same keys for the same node index.

use once_cell::sync::Lazy;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::EncodePublicKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha2::{Digest, Sha384};
use stateproof_types::app::{AddressBookRow, FileHash, NodeRef, ProofBundle, RecordContent};
use stateproof_types::codec::{encode_address_book, encode_signature_file, NodeAddressSpec};
use std::collections::BTreeMap;

use crate::randomness::TestRng;

/// The largest network a fixture can build.
pub const MAX_TEST_NODES: usize = 7;

/// Node ids start at 3, matching the usual numbering of consensus nodes.
const FIRST_NODE_ID: u64 = 3;

#[allow(clippy::expect_used)]
static NODE_KEYS: Lazy<Vec<(RsaPrivateKey, Vec<u8>)>> = Lazy::new(|| {
    (0..MAX_TEST_NODES as u64)
        .map(|i| {
            let private = RsaPrivateKey::new(&mut TestRng::new(1000 + i), 1024)
                .expect("test key generation");
            let der = private
                .to_public_key()
                .to_public_key_der()
                .expect("test key encoding")
                .as_bytes()
                .to_vec();
            (private, der)
        })
        .collect()
});

/// SHA-384 of `content`, the hash nodes sign for a record file.
pub fn record_hash(content: &[u8]) -> FileHash {
    let mut out = [0u8; 48];
    out.copy_from_slice(&Sha384::digest(content));
    FileHash(out)
}

/// One consensus node with a signing key.
#[derive(Clone)]
pub struct TestNode {
    /// How the address book identifies this node.
    pub node: NodeRef,
    private: RsaPrivateKey,
    public_der: Vec<u8>,
}

impl TestNode {
    /// The DER `SubjectPublicKeyInfo` of the node key.
    pub fn public_key_der(&self) -> &[u8] {
        &self.public_der
    }

    /// SHA384withRSA over `message`.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        SigningKey::<Sha384>::new(self.private.clone())
            .sign(message)
            .to_vec()
    }

    /// A signature file attesting to `hash`.
    pub fn signature_file(&self, hash: &FileHash) -> Vec<u8> {
        encode_signature_file(hash, &self.sign(hash.as_bytes()))
    }

    /// This node's entry for an address book.
    pub fn address_spec(&self) -> NodeAddressSpec {
        let node_id = match &self.node {
            NodeRef::Id(id) => i64::try_from(*id).unwrap_or_default(),
            NodeRef::Memo(_) => 0,
        };
        let memo = match &self.node {
            NodeRef::Id(_) => String::new(),
            NodeRef::Memo(memo) => memo.clone(),
        };
        NodeAddressSpec {
            node_id,
            memo,
            public_key: self.public_der.clone(),
        }
    }
}

/// A set of nodes sharing one address book.
#[derive(Clone)]
pub struct TestNetwork {
    nodes: Vec<TestNode>,
}

impl TestNetwork {
    /// `size` nodes with ids `3..3 + size`.
    ///
    /// Panics when `size` exceeds [`MAX_TEST_NODES`].
    pub fn new(size: usize) -> Self {
        assert!(size <= MAX_TEST_NODES, "at most {MAX_TEST_NODES} test nodes");
        let nodes = NODE_KEYS
            .iter()
            .take(size)
            .zip(FIRST_NODE_ID..)
            .map(|((private, der), id)| TestNode {
                node: NodeRef::Id(id),
                private: private.clone(),
                public_der: der.clone(),
            })
            .collect();
        Self { nodes }
    }

    /// The same keys, identified by `0.0.{id}` memos instead of node ids.
    pub fn with_memo_identities(mut self) -> Self {
        for node in &mut self.nodes {
            node.node = NodeRef::Memo(format!("0.0.{}", node.node));
        }
        self
    }

    /// Every node, in id order.
    pub fn nodes(&self) -> &[TestNode] {
        &self.nodes
    }

    /// Panics when `index` is out of range.
    #[allow(clippy::indexing_slicing)]
    pub fn node(&self, index: usize) -> &TestNode {
        &self.nodes[index]
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the network has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node references, in id order.
    pub fn node_refs(&self) -> Vec<NodeRef> {
        self.nodes.iter().map(|n| n.node.clone()).collect()
    }

    /// The serialized `NodeAddressBook` listing every node.
    pub fn address_book(&self) -> Vec<u8> {
        let specs: Vec<NodeAddressSpec> = self.nodes.iter().map(TestNode::address_spec).collect();
        encode_address_book(&specs)
    }

    /// A ledger row for this network's address book.
    pub fn address_book_row(&self, start_consensus_timestamp: i64) -> AddressBookRow {
        AddressBookRow {
            start_consensus_timestamp,
            file_data: self.address_book(),
            node_count: self.nodes.len(),
            nodes: self.node_refs(),
        }
    }

    /// Signature files over `hash` from the nodes at `signers`.
    pub fn signature_files(&self, signers: &[usize], hash: &FileHash) -> BTreeMap<NodeRef, Vec<u8>> {
        signers
            .iter()
            .map(|&i| {
                let node = self.node(i);
                (node.node.clone(), node.signature_file(hash))
            })
            .collect()
    }

    /// A full-content bundle over `content`, signed by `signers`.
    pub fn bundle(&self, content: &[u8], signers: &[usize]) -> ProofBundle {
        ProofBundle::new(
            RecordContent::Full(content.to_vec()),
            vec![self.address_book()],
            self.signature_files(signers, &record_hash(content)),
            6,
        )
    }
}
