// Path: crates/consensus/src/lib.rs
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
//! Independent verification of proof bundles.
//!
//! A bundle is valid when at least one third of the nodes in the directory
//! in effect produced valid signatures over the same record file hash, and
//! that hash equals the hash of the record content shipped in the bundle.

pub mod record;
pub mod verifier;

pub use record::Sha384RecordCodec;
pub use verifier::ConsensusVerifier;
