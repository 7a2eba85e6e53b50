// Path: crates/api/src/crypto/mod.rs
//! Defines unified traits for cryptographic primitives.

use crate::error::CryptoError;
use stateproof_types::app::Key;

/// A trait for any key that can be serialized to and from bytes.
pub trait SerializableKey {
    /// Converts the key to a byte vector.
    fn to_bytes(&self) -> Vec<u8>;

    /// Creates a key from a byte slice.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError>
    where
        Self: Sized;
}

/// A trait for a public key used for signature verification.
pub trait VerifyingKey: SerializableKey {
    /// Verifies a raw signature against a message.
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), CryptoError>;
}

/// A trait for parallelized batch signature verification.
pub trait BatchVerifier: Send + Sync {
    /// Verifies a batch of signatures.
    ///
    /// # Arguments
    /// * `items`: A slice of tuples containing (key, message, signature).
    ///
    /// # Returns
    /// A vector of booleans indicating the validity of each item in the batch.
    /// The order corresponds to the input slice. A `Key::List` is valid when
    /// any of its keys verifies.
    fn verify_batch(&self, items: &[(&Key, &[u8], &[u8])]) -> Result<Vec<bool>, CryptoError>;
}
