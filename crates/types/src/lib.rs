// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]

//! # State Proof Types
//!
//! This crate is the foundational library for the state proof engine. It holds
//! the data model shared by the assembly and verification sides, the two
//! binary codecs (signature files and node address books), the error taxonomy
//! and the configuration structures.
//!
//! ## Architectural Role
//!
//! As the base crate, `stateproof-types` has minimal dependencies and is itself
//! a dependency for every other crate in the workspace. Assembly and
//! verification share nothing at runtime except what is defined here: the
//! wire formats and the quorum rule.

/// The size in bytes of a record file hash (SHA-384).
pub const HASH_SIZE: usize = 48;

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::ProofError> = std::result::Result<T, E>;

/// Core data structures: identifiers, locators, directories, bundles and results.
pub mod app;
/// Binary codecs for signature files and node address books.
pub mod codec;
/// Configuration structures for the assembly side.
pub mod config;
/// The unified set of error types used across the workspace.
pub mod error;
/// A prelude with the most commonly used types.
pub mod prelude;
