// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # State Proof Test Utilities
//!
//! Deterministic RSA node keys, signature file and address book builders, and
//! an object store wrapper that injects failures.

pub mod assertions;
pub mod fixtures;
pub mod randomness;
pub mod store;

pub use fixtures::{TestNetwork, TestNode};
pub use store::FlakyObjectStore;
