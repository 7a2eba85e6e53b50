// Path: crates/crypto/src/sign/rsa/tests/mod.rs
use super::*;
use rsa::pkcs1::EncodeRsaPublicKey;
use rsa::pkcs8::EncodePublicKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;

fn keypair() -> (RsaPrivateKey, Vec<u8>) {
    let mut rng = rand::thread_rng();
    let private = RsaPrivateKey::new(&mut rng, 1024).unwrap();
    let der = private
        .to_public_key()
        .to_public_key_der()
        .unwrap()
        .as_bytes()
        .to_vec();
    (private, der)
}

fn sign(private: &RsaPrivateKey, message: &[u8]) -> Vec<u8> {
    pkcs1v15::SigningKey::<Sha384>::new(private.clone())
        .sign(message)
        .to_vec()
}

#[test]
fn test_verify_accepts_valid_signature() {
    let (private, der) = keypair();
    let key = RsaSha384PublicKey::from_bytes(&der).unwrap();
    let hash = [7u8; 48];
    let signature = sign(&private, &hash);

    assert!(key.verify(&hash, &signature).is_ok());
    assert_eq!(key.to_bytes(), der);
    assert_eq!(key.bits(), 1024);
}

#[test]
fn test_verify_rejects_other_message() {
    let (private, der) = keypair();
    let key = RsaSha384PublicKey::from_bytes(&der).unwrap();
    let signature = sign(&private, &[1u8; 48]);

    assert!(matches!(
        key.verify(&[2u8; 48], &signature),
        Err(CryptoError::VerificationFailed)
    ));
}

#[test]
fn test_verify_rejects_other_key() {
    let (private, _) = keypair();
    let (_, other_der) = keypair();
    let key = RsaSha384PublicKey::from_bytes(&other_der).unwrap();
    let signature = sign(&private, &[1u8; 48]);

    assert!(key.verify(&[1u8; 48], &signature).is_err());
}

#[test]
fn test_pkcs1_fallback() {
    let (private, _) = keypair();
    let pkcs1 = private
        .to_public_key()
        .to_pkcs1_der()
        .unwrap()
        .as_bytes()
        .to_vec();
    let key = RsaSha384PublicKey::from_bytes(&pkcs1).unwrap();
    let signature = sign(&private, &[3u8; 48]);
    assert!(key.verify(&[3u8; 48], &signature).is_ok());
}

#[test]
fn test_invalid_key_bytes() {
    assert!(matches!(
        RsaSha384PublicKey::from_bytes(&[0x30, 0x01, 0x00]),
        Err(CryptoError::InvalidKey(_))
    ));
}
