// Path: crates/crypto/src/error.rs
//! Local error types for the `stateproof-crypto` crate.

// Re-export the canonical error type from the API crate.
pub use stateproof_api::error::CryptoError;
