// Path: crates/api/src/lib.rs

//! # State Proof API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # State Proof API
//!
//! The stable contracts between the proof engine and its collaborators: the
//! ledger query layer, the object store and the record codec. The core only
//! ever talks to these through the traits defined here.

/// Defines unified traits for cryptographic primitives.
pub mod crypto;
/// Re-exports all core error types from the central `stateproof-types` crate.
pub mod error;
/// The ledger query contract: finalized records and address book chains.
pub mod ledger;
/// The record codec contract: hashing and compacting record files.
pub mod record;
/// The object store contract.
pub mod storage;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::crypto::{BatchVerifier, SerializableKey, VerifyingKey};
    pub use crate::error::{
        CodecError, CryptoError, DecodeError, ErrorCode, LedgerError, ProofError, StoreError,
        VerifyError,
    };
    pub use crate::ledger::LedgerQuery;
    pub use crate::record::RecordCodec;
    pub use crate::storage::ObjectStore;
}
