// Path: crates/types/src/prelude.rs

//! A curated set of commonly used traits and types.

pub use crate::app::{
    can_reach_quorum, ConsensusRecordLocator, ConsensusResult, FileHash, Key, NodeDirectory,
    NodeRef, ProofBundle, RecordContent, SignatureArtifact, TransactionId,
};
pub use crate::error::{DecodeError, ErrorCode, ProofError};

