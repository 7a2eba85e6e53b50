// Path: crates/crypto/src/lib.rs
//! # State Proof Crypto Crate Lints
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
        clippy::indexing_slicing
    )
)]
//! # State Proof Cryptography
//!
//! SHA-384 hashing and RSA PKCS#1 v1.5 / SHA-384 signature verification, the
//! two primitives consensus nodes use to attest to record files.

pub mod algorithms;
pub mod error;
pub mod sign;

