// Path: crates/crypto/src/sign/batch.rs

use crate::error::CryptoError;
use crate::sign::rsa::RsaSha384PublicKey;
use rayon::prelude::*;
use stateproof_api::crypto::{BatchVerifier, SerializableKey, VerifyingKey};
use stateproof_types::app::Key;

/// A CPU-based batch verifier that uses Rayon for parallelism.
#[derive(Default, Debug)]
pub struct CpuBatchVerifier;

impl CpuBatchVerifier {
    pub fn new() -> Self {
        Self
    }

    fn verify_single(&self, key: &Key, message: &[u8], signature: &[u8]) -> bool {
        // A key list is satisfied by any one of its members.
        key.single_keys().into_iter().any(|der| {
            match RsaSha384PublicKey::from_bytes(der) {
                Ok(pk) => pk.verify(message, signature).is_ok(),
                Err(e) => {
                    tracing::debug!(target: "crypto", error = %e, "skipping unparseable public key");
                    false
                }
            }
        })
    }
}

impl BatchVerifier for CpuBatchVerifier {
    fn verify_batch(&self, items: &[(&Key, &[u8], &[u8])]) -> Result<Vec<bool>, CryptoError> {
        let results: Vec<bool> = items
            .par_iter()
            .map(|(key, msg, sig)| self.verify_single(key, msg, sig))
            .collect();
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs1v15::SigningKey;
    use rsa::pkcs8::EncodePublicKey;
    use rsa::signature::{SignatureEncoding, Signer};
    use rsa::RsaPrivateKey;
    use sha2::Sha384;

    fn keypair() -> (RsaPrivateKey, Vec<u8>) {
        let private = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        let der = private
            .to_public_key()
            .to_public_key_der()
            .unwrap()
            .as_bytes()
            .to_vec();
        (private, der)
    }

    #[test]
    fn verifies_items_in_order() {
        let (a, a_der) = keypair();
        let (_, b_der) = keypair();
        let hash = [9u8; 48];
        let sig = SigningKey::<Sha384>::new(a).sign(&hash).to_vec();

        let key_a = Key::Single(a_der.clone());
        let key_b = Key::Single(b_der.clone());
        let list = Key::List(vec![Key::Single(b_der), Key::Single(a_der)]);
        let garbage = Key::Single(vec![1, 2, 3]);
        let items: Vec<(&Key, &[u8], &[u8])> = vec![
            (&key_a, &hash[..], &sig[..]),
            (&key_b, &hash[..], &sig[..]),
            (&list, &hash[..], &sig[..]),
            (&garbage, &hash[..], &sig[..]),
        ];

        let results = CpuBatchVerifier::new().verify_batch(&items).unwrap();
        assert_eq!(results, vec![true, false, true, false]);
    }
}
