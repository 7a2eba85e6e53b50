// Path: crates/api/src/record/mod.rs

//! API for the record stream codec.
//!
//! The engine never parses record files itself. It asks the codec for the
//! hash the nodes sign and, optionally, for a smaller representation to ship.

use crate::error::CodecError;
use stateproof_types::app::{FileHash, RecordContent, TransactionId};

/// Hashes and reduces record stream files.
pub trait RecordCodec: Send + Sync {
    /// The hash nodes sign for this content.
    fn hash_of(&self, content: &RecordContent) -> Result<FileHash, CodecError>;

    /// Whether `bytes` can be reduced to a compact proof.
    fn can_compact(&self, bytes: &[u8]) -> bool;

    /// Reduces a full record file to the compact representation that still
    /// proves the given transaction.
    fn to_compact_proof(
        &self,
        bytes: &[u8],
        transaction_id: &TransactionId,
        nonce: u32,
        scheduled: bool,
    ) -> Result<Vec<u8>, CodecError>;
}
