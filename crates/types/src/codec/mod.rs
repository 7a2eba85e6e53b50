// Path: crates/types/src/codec/mod.rs

//! Binary codecs for the two untrusted inputs a verifier decodes.
//!
//! Both decoders are total over their input: malformed bytes produce a
//! `DecodeError`, never a panic or a silently partial result.

/// The protobuf `NodeAddressBook` decoder (node directory codec).
pub mod address_book;
/// The tagged signature file decoder (signature artifact codec).
pub mod signature;

pub use address_book::{decode as decode_address_book, encode_address_book, NodeAddressSpec};
pub use signature::{decode as decode_signature_file, encode_signature_file, SignatureFile};
