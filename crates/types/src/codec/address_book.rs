// Path: crates/types/src/codec/address_book.rs

//! Node directory codec.
//!
//! Address book snapshots are protobuf `NodeAddressBook` messages. Each
//! `NodeAddress` contributes one directory entry keyed by its numeric node id,
//! or by its memo when the id is absent or zero, and carrying its hex-encoded
//! DER RSA public key. The number of `NodeAddress` records is the snapshot's
//! declared node count.

use crate::app::{Key, NodeDirectory, NodeDirectoryEntry, NodeRef};
use crate::error::DecodeError;
use prost::Message;

mod proto {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct NodeAddressBook {
        #[prost(message, repeated, tag = "1")]
        pub node_address: Vec<NodeAddress>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct NodeAddress {
        #[prost(bytes = "vec", tag = "1")]
        pub ip_address: Vec<u8>,
        #[prost(int32, tag = "2")]
        pub portno: i32,
        #[prost(bytes = "vec", tag = "3")]
        pub memo: Vec<u8>,
        #[prost(string, tag = "4")]
        pub rsa_pub_key: String,
        #[prost(int64, tag = "5")]
        pub node_id: i64,
        #[prost(message, optional, tag = "6")]
        pub node_account_id: Option<AccountId>,
        #[prost(bytes = "vec", tag = "7")]
        pub node_cert_hash: Vec<u8>,
        #[prost(string, tag = "9")]
        pub description: String,
        #[prost(int64, tag = "10")]
        pub stake: i64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AccountId {
        #[prost(int64, tag = "1")]
        pub shard_num: i64,
        #[prost(int64, tag = "2")]
        pub realm_num: i64,
        #[prost(int64, tag = "3")]
        pub account_num: i64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Key {
        #[prost(oneof = "key::Kind", tags = "4, 6")]
        pub kind: Option<key::Kind>,
    }

    pub mod key {
        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Kind {
            #[prost(bytes, tag = "4")]
            Rsa3072(Vec<u8>),
            #[prost(message, tag = "6")]
            KeyList(super::KeyList),
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct KeyList {
        #[prost(message, repeated, tag = "1")]
        pub keys: Vec<Key>,
    }
}

/// The fields of one `NodeAddress` record, used to build snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeAddressSpec {
    /// Numeric node id; zero means absent.
    pub node_id: i64,
    /// Memo text, the fallback identity.
    pub memo: String,
    /// DER public key; written hex-encoded. Empty means no key.
    pub public_key: Vec<u8>,
}

/// Decodes a serialized `NodeAddressBook` into a node directory.
///
/// Records without an identity or without a key are not entries, so they
/// surface as a node count mismatch.
pub fn decode(bytes: &[u8]) -> Result<NodeDirectory, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty("address book"));
    }
    let book =
        proto::NodeAddressBook::decode(bytes).map_err(|e| DecodeError::Protobuf(e.to_string()))?;
    if book.node_address.is_empty() {
        return Err(DecodeError::Empty("address book"));
    }

    let declared = book.node_address.len();
    let mut entries = Vec::with_capacity(declared);
    for address in book.node_address {
        let memo = String::from_utf8(address.memo).unwrap_or_default();
        let Some(node) = NodeRef::from_record(address.node_id, &memo) else {
            continue;
        };
        let key_hex = address.rsa_pub_key.trim();
        if key_hex.is_empty() {
            continue;
        }
        let der = hex::decode(key_hex.strip_prefix("0x").unwrap_or(key_hex)).map_err(|e| {
            DecodeError::InvalidPublicKey {
                node: node.to_string(),
                reason: e.to_string(),
            }
        })?;
        entries.push(NodeDirectoryEntry {
            node,
            key: Key::Single(der),
        });
    }
    NodeDirectory::new(entries, declared)
}

/// Encodes a `NodeAddressBook` from record specs, in order.
pub fn encode_address_book(nodes: &[NodeAddressSpec]) -> Vec<u8> {
    proto::NodeAddressBook {
        node_address: nodes
            .iter()
            .map(|n| proto::NodeAddress {
                memo: n.memo.as_bytes().to_vec(),
                rsa_pub_key: hex::encode(&n.public_key),
                node_id: n.node_id,
                ..Default::default()
            })
            .collect(),
    }
    .encode_to_vec()
}

fn key_to_proto(key: &Key) -> proto::Key {
    let kind = match key {
        Key::Single(bytes) => proto::key::Kind::Rsa3072(bytes.clone()),
        Key::List(keys) => proto::key::Kind::KeyList(proto::KeyList {
            keys: keys.iter().map(key_to_proto).collect(),
        }),
    };
    proto::Key { kind: Some(kind) }
}

/// Encodes a key as a protobuf `Key` message.
pub fn encode_key(key: &Key) -> Vec<u8> {
    key_to_proto(key).encode_to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(node_id: i64, memo: &str, key: &[u8]) -> NodeAddressSpec {
        NodeAddressSpec {
            node_id,
            memo: memo.to_string(),
            public_key: key.to_vec(),
        }
    }

    #[test]
    fn decodes_node_ids_in_order() {
        let bytes = encode_address_book(&[
            spec(3, "", &[0x30, 1]),
            spec(4, "", &[0x30, 2]),
            spec(5, "", &[0x30, 3]),
        ]);
        let dir = decode(&bytes).unwrap();
        assert_eq!(dir.declared_node_count(), 3);
        let nodes: Vec<_> = dir.nodes().cloned().collect();
        assert_eq!(nodes, vec![NodeRef::Id(3), NodeRef::Id(4), NodeRef::Id(5)]);
        assert_eq!(
            dir.key_for(&NodeRef::Id(4)),
            Some(&Key::Single(vec![0x30, 2]))
        );
    }

    #[test]
    fn falls_back_to_memo_when_node_id_is_zero() {
        let bytes = encode_address_book(&[spec(0, "0.0.3", &[1]), spec(0, "0.0.4", &[2])]);
        let dir = decode(&bytes).unwrap();
        assert!(dir
            .key_for(&NodeRef::Memo("0.0.3".to_string()))
            .is_some());
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn rejects_count_mismatch_with_node_ids() {
        // Third record carries no key.
        let bytes = encode_address_book(&[spec(1, "", &[1]), spec(2, "", &[2]), spec(3, "", &[])]);
        assert_eq!(
            decode(&bytes).unwrap_err(),
            DecodeError::NodeCountMismatch {
                declared: 3,
                decoded: 2
            }
        );
    }

    #[test]
    fn rejects_count_mismatch_with_memos() {
        // Third record has neither a node id nor a memo.
        let bytes = encode_address_book(&[
            spec(0, "0.0.3", &[1]),
            spec(0, "0.0.4", &[2]),
            spec(0, "", &[3]),
        ]);
        assert_eq!(
            decode(&bytes).unwrap_err(),
            DecodeError::NodeCountMismatch {
                declared: 3,
                decoded: 2
            }
        );
    }

    #[test]
    fn rejects_empty_and_malformed_input() {
        assert_eq!(decode(&[]), Err(DecodeError::Empty("address book")));
        assert!(matches!(
            decode(&[0xff, 0xff, 0xff]),
            Err(DecodeError::Protobuf(_))
        ));
    }

    #[test]
    fn rejects_non_hex_public_key() {
        let book = proto::NodeAddressBook {
            node_address: vec![proto::NodeAddress {
                node_id: 7,
                rsa_pub_key: "zz".to_string(),
                ..Default::default()
            }],
        };
        let err = decode(&book.encode_to_vec()).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidPublicKey { ref node, .. } if node == "7"));
    }

    #[test]
    fn key_wire_bytes_use_rsa_and_key_list_tags() {
        let single = encode_key(&Key::Single(vec![0xaa]));
        // field 4, wire type 2, length 1
        assert_eq!(single, vec![0x22, 0x01, 0xaa]);

        let list = encode_key(&Key::List(vec![Key::Single(vec![0xaa])]));
        // field 6 wrapping a KeyList whose field 1 holds the single key
        assert_eq!(list, vec![0x32, 0x05, 0x0a, 0x03, 0x22, 0x01, 0xaa]);
    }
}
