// Path: crates/consensus/src/record.rs
//! The default record codec: a flat SHA-384 over the record file.

use stateproof_api::record::RecordCodec;
use stateproof_crypto::algorithms::hash::file_hash;
use stateproof_types::app::{FileHash, RecordContent, TransactionId};
use stateproof_types::error::CodecError;

/// Hashes full record files and knows no compact representation.
///
/// Record formats whose signed hash is not a digest of the whole file need a
/// codec that understands the container.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha384RecordCodec;

impl RecordCodec for Sha384RecordCodec {
    fn hash_of(&self, content: &RecordContent) -> Result<FileHash, CodecError> {
        match content {
            RecordContent::Full(bytes) => {
                file_hash(bytes).map_err(|e| CodecError::Malformed(e.to_string()))
            }
            RecordContent::Compact(_) => Err(CodecError::Unsupported(
                "compact record content needs a container-aware codec".into(),
            )),
        }
    }

    fn can_compact(&self, _bytes: &[u8]) -> bool {
        false
    }

    fn to_compact_proof(
        &self,
        _bytes: &[u8],
        transaction_id: &TransactionId,
        _nonce: u32,
        _scheduled: bool,
    ) -> Result<Vec<u8>, CodecError> {
        Err(CodecError::Unsupported(format!(
            "no compact proof for {transaction_id}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stateproof_test_utils::fixtures::record_hash;

    #[test]
    fn hashes_full_content_only() {
        let codec = Sha384RecordCodec;
        assert_eq!(
            codec.hash_of(&RecordContent::Full(b"abc".to_vec())).unwrap(),
            record_hash(b"abc")
        );
        assert!(matches!(
            codec.hash_of(&RecordContent::Compact(vec![1])),
            Err(CodecError::Unsupported(_))
        ));
        assert!(!codec.can_compact(b"abc"));
    }
}
