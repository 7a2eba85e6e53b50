// Path: crates/crypto/src/algorithms/hash/mod.rs
//! Cryptographic hash functions using the RustCrypto `sha2` crate

use crate::error::CryptoError;
use sha2::{Digest, Sha384};
use stateproof_types::app::{FileHash, Key};
use stateproof_types::HASH_SIZE;

/// Hash function trait
pub trait HashFunction {
    /// Hash a message and return the digest
    fn hash(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Get the digest size in bytes
    fn digest_size(&self) -> usize;

    /// Get the name of the hash function
    fn name(&self) -> &str;
}

/// SHA-384 hash function implementation
#[derive(Default, Clone)]
pub struct Sha384Hash;

impl HashFunction for Sha384Hash {
    fn hash(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(Sha384::digest(message).to_vec())
    }

    fn digest_size(&self) -> usize {
        HASH_SIZE // 384 bits = 48 bytes
    }

    fn name(&self) -> &str {
        "SHA-384"
    }
}

/// Create a SHA-384 hash of any type that can be referenced as bytes
pub fn sha384<T: AsRef<[u8]>>(data: T) -> Result<[u8; HASH_SIZE], CryptoError> {
    let hasher = Sha384Hash;
    hasher
        .hash(data.as_ref())?
        .try_into()
        .map_err(|bytes: Vec<u8>| CryptoError::InvalidHashLength {
            expected: HASH_SIZE,
            got: bytes.len(),
        })
}

/// SHA-384 of `data` as a record file hash.
pub fn file_hash<T: AsRef<[u8]>>(data: T) -> Result<FileHash, CryptoError> {
    sha384(data).map(FileHash)
}

/// A short, stable identifier for a key: the first 8 bytes of the SHA-384 of
/// its protobuf wire form, hex encoded.
pub fn key_fingerprint(key: &Key) -> Result<String, CryptoError> {
    let digest = sha384(key.to_wire_bytes())?;
    Ok(hex::encode(digest.get(..8).unwrap_or_default()))
}

#[cfg(test)]
mod tests;
