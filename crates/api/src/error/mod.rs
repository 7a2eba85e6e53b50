// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use stateproof_types::error::{
    CodecError, CryptoError, DecodeError, ErrorCode, LedgerError, ProofError, StoreError,
    TransactionIdError, VerifyError,
};
pub use stateproof_types::Result;
