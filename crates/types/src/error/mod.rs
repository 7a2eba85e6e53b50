// Path: crates/types/src/error/mod.rs
//! Core error types for the state proof engine.

use crate::app::ArtifactKind;
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised while decoding untrusted binary input (signature files,
/// address books, bundle payloads).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input buffer was empty or contained no records.
    #[error("empty input: {0}")]
    Empty(&'static str),
    /// A signature file contained a tag byte that is neither a hash nor a signature.
    #[error("unexpected type tag {tag} at offset {offset}")]
    UnexpectedTag {
        /// The offending tag value.
        tag: u8,
        /// The byte offset of the tag within the buffer.
        offset: usize,
    },
    /// A read would run past the end of the buffer.
    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        /// The byte offset where the read started.
        offset: usize,
        /// The number of bytes the read required.
        needed: usize,
        /// The number of bytes left in the buffer.
        available: usize,
    },
    /// A required field never appeared in the input.
    #[error("missing field: {0}")]
    MissingField(&'static str),
    /// The number of usable directory entries differs from the declared node count.
    #[error("node count mismatch: declared {declared}, decoded {decoded}")]
    NodeCountMismatch {
        /// The node count the directory declares.
        declared: usize,
        /// The number of entries actually decoded.
        decoded: usize,
    },
    /// The protobuf envelope could not be decoded.
    #[error("protobuf decode failed: {0}")]
    Protobuf(String),
    /// A node's public key was not valid hex.
    #[error("invalid public key for node {node}: {reason}")]
    InvalidPublicKey {
        /// The node whose key is malformed.
        node: String,
        /// Why the key was rejected.
        reason: String,
    },
    /// A base64 payload in a bundle could not be decoded.
    #[error("invalid base64 in {field}: {reason}")]
    Base64 {
        /// The bundle field holding the payload.
        field: String,
        /// The decoder's error message.
        reason: String,
    },
}

impl ErrorCode for DecodeError {
    fn code(&self) -> &'static str {
        match self {
            Self::Empty(_) => "DECODE_EMPTY",
            Self::UnexpectedTag { .. } => "DECODE_UNEXPECTED_TAG",
            Self::Truncated { .. } => "DECODE_TRUNCATED",
            Self::MissingField(_) => "DECODE_MISSING_FIELD",
            Self::NodeCountMismatch { .. } => "DECODE_NODE_COUNT_MISMATCH",
            Self::Protobuf(_) => "DECODE_PROTOBUF",
            Self::InvalidPublicKey { .. } => "DECODE_INVALID_PUBLIC_KEY",
            Self::Base64 { .. } => "DECODE_BASE64",
        }
    }
}

/// Errors returned by an object store for a single key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The object does not exist.
    #[error("object not found: {bucket}/{key}")]
    NotFound {
        /// The bucket that was queried.
        bucket: String,
        /// The object key.
        key: String,
    },
    /// The fetch did not complete within its deadline.
    #[error("fetch of {key} timed out after {millis}ms")]
    Timeout {
        /// The object key.
        key: String,
        /// The deadline that elapsed.
        millis: u64,
    },
    /// The object exists but has no content.
    #[error("object {key} is empty")]
    Empty {
        /// The object key.
        key: String,
    },
    /// A transport or provider failure.
    #[error("object store backend error: {0}")]
    Backend(String),
}

impl ErrorCode for StoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "STORE_NOT_FOUND",
            Self::Timeout { .. } => "STORE_TIMEOUT",
            Self::Empty { .. } => "STORE_EMPTY",
            Self::Backend(_) => "STORE_BACKEND_ERROR",
        }
    }
}

/// Errors from the ledger query collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The query backend failed.
    #[error("ledger backend error: {0}")]
    Backend(String),
    /// The ledger returned a row that could not be interpreted.
    #[error("malformed ledger row: {0}")]
    MalformedRow(String),
}

impl ErrorCode for LedgerError {
    fn code(&self) -> &'static str {
        match self {
            Self::Backend(_) => "LEDGER_BACKEND_ERROR",
            Self::MalformedRow(_) => "LEDGER_MALFORMED_ROW",
        }
    }
}

/// Errors from the record codec collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The codec does not support the requested operation for this content.
    #[error("unsupported record content: {0}")]
    Unsupported(String),
    /// The record content could not be parsed.
    #[error("malformed record content: {0}")]
    Malformed(String),
}

impl ErrorCode for CodecError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unsupported(_) => "CODEC_UNSUPPORTED",
            Self::Malformed(_) => "CODEC_MALFORMED",
        }
    }
}

/// Errors related to cryptographic primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A key could not be parsed.
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// A signature could not be parsed.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    /// A well-formed signature did not verify.
    #[error("signature verification failed")]
    VerificationFailed,
    /// A digest had an unexpected length.
    #[error("invalid hash length: expected {expected}, got {got}")]
    InvalidHashLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        got: usize,
    },
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::InvalidSignature(_) => "CRYPTO_INVALID_SIGNATURE",
            Self::VerificationFailed => "CRYPTO_VERIFICATION_FAILED",
            Self::InvalidHashLength { .. } => "CRYPTO_INVALID_HASH_LENGTH",
        }
    }
}

/// Errors raised while parsing a transaction identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionIdError {
    /// The string does not follow either canonical form.
    #[error("invalid transaction id format: {0}")]
    Format(String),
    /// The payer entity id is malformed.
    #[error("invalid entity id: {0}")]
    EntityId(String),
    /// The valid-start seconds are negative or out of range.
    #[error("invalid valid-start seconds: {0}")]
    Seconds(String),
    /// The valid-start nanos are outside `[0, 10^9)`.
    #[error("invalid valid-start nanos: {0}")]
    Nanos(String),
}

impl ErrorCode for TransactionIdError {
    fn code(&self) -> &'static str {
        match self {
            Self::Format(_) => "TXID_FORMAT",
            Self::EntityId(_) => "TXID_ENTITY_ID",
            Self::Seconds(_) => "TXID_SECONDS",
            Self::Nanos(_) => "TXID_NANOS",
        }
    }
}

/// Errors raised while building a proof bundle.
#[derive(Error, Debug)]
pub enum ProofError {
    /// No matching transaction, record file or address book.
    #[error("not found: {0}")]
    NotFound(String),
    /// Data that must be internally consistent is not.
    #[error("integrity violation: {0}")]
    Invariant(String),
    /// Too few downloads succeeded to reach the one-third quorum.
    #[error("require at least 1/3 {kind} to be downloaded, got {actual} out of {total}")]
    Quorum {
        /// Which artifact kind fell short.
        kind: ArtifactKind,
        /// Number of successful downloads.
        actual: usize,
        /// Number of nodes in effect.
        total: usize,
    },
    /// A single-sourced file could not be downloaded.
    #[error("failed to download {0}")]
    FileDownload(String),
    /// A binary payload was malformed.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    /// The ledger collaborator failed.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
    /// The record codec collaborator failed.
    #[error("record codec error: {0}")]
    Codec(#[from] CodecError),
}

impl ErrorCode for ProofError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "PROOF_NOT_FOUND",
            Self::Invariant(_) => "PROOF_INVARIANT",
            Self::Quorum { .. } => "PROOF_QUORUM_NOT_MET",
            Self::FileDownload(_) => "PROOF_FILE_DOWNLOAD",
            Self::Decode(_) => "PROOF_DECODE_ERROR",
            Self::Ledger(_) => "PROOF_LEDGER_ERROR",
            Self::Codec(_) => "PROOF_CODEC_ERROR",
        }
    }
}

/// Errors that abort verification of a bundle.
///
/// Disagreement between nodes is not an error; it is reported through
/// `ConsensusResult`.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// A signature file or directory snapshot was malformed.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    /// The record content could not be hashed.
    #[error("record codec error: {0}")]
    Codec(#[from] CodecError),
    /// The signature batch could not be evaluated.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl ErrorCode for VerifyError {
    fn code(&self) -> &'static str {
        match self {
            Self::Decode(e) => e.code(),
            Self::Codec(e) => e.code(),
            Self::Crypto(e) => e.code(),
        }
    }
}
