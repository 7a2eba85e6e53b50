// Path: crates/crypto/src/sign/rsa/mod.rs
//! RSA PKCS#1 v1.5 signature verification over SHA-384, using the RustCrypto `rsa` crate.
//!
//! Nodes sign the 48-byte record file hash, so the message handed to
//! [`VerifyingKey::verify`] is the hash itself and the scheme digests it
//! once more.

use crate::error::CryptoError;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs1v15;
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use rsa::RsaPublicKey;
use sha2::Sha384;
use stateproof_api::crypto::{SerializableKey, VerifyingKey};

/// An RSA public key that verifies SHA384withRSA signatures.
#[derive(Clone, Debug)]
pub struct RsaSha384PublicKey {
    verifier: pkcs1v15::VerifyingKey<Sha384>,
    der: Vec<u8>,
}

impl RsaSha384PublicKey {
    /// The modulus size in bits.
    pub fn bits(&self) -> usize {
        use rsa::traits::PublicKeyParts;
        self.verifier.as_ref().n().bits()
    }
}

impl SerializableKey for RsaSha384PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.der.clone()
    }

    /// Accepts an X.509 `SubjectPublicKeyInfo` DER document, falling back to a
    /// bare PKCS#1 `RSAPublicKey`.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key = RsaPublicKey::from_public_key_der(bytes)
            .or_else(|_| RsaPublicKey::from_pkcs1_der(bytes))
            .map_err(|e| CryptoError::InvalidKey(format!("Failed to parse RSA public key: {e}")))?;
        Ok(Self {
            verifier: pkcs1v15::VerifyingKey::<Sha384>::new(key),
            der: bytes.to_vec(),
        })
    }
}

impl VerifyingKey for RsaSha384PublicKey {
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        let sig = pkcs1v15::Signature::try_from(signature)
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        self.verifier
            .verify(message, &sig)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

#[cfg(test)]
mod tests;
