// Path: crates/types/src/codec/signature.rs

//! Signature file codec.
//!
//! A signature file is a flat sequence of `(tag, payload)` records:
//!
//! | tag | payload                                         |
//! |-----|-------------------------------------------------|
//! | `4` | 48-byte file hash                               |
//! | `3` | 4-byte big-endian length, then that many bytes  |
//!
//! The scan stops one byte short of the end: a single trailing byte is slack
//! and never starts a record.

use crate::app::{FileHash, NodeRef, SignatureArtifact};
use crate::error::DecodeError;
use crate::HASH_SIZE;

/// Tag introducing a length-prefixed signature.
pub const TYPE_SIGNATURE: u8 = 3;
/// Tag introducing a fixed-size file hash.
pub const TYPE_FILE_HASH: u8 = 4;

const LENGTH_PREFIX: usize = 4;

/// One record of a signature file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureField {
    /// A file hash record.
    Hash(FileHash),
    /// A signature record.
    Signature(Vec<u8>),
}

/// A parsed signature file that keeps every record in its original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureFile {
    fields: Vec<SignatureField>,
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.buf.len());
        let slice = end.and_then(|end| self.buf.get(self.pos..end));
        match slice {
            Some(s) => {
                self.pos += n;
                Ok(s)
            }
            None => Err(DecodeError::Truncated {
                offset: self.pos,
                needed: n,
                available: self.buf.len().saturating_sub(self.pos),
            }),
        }
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        let b = self.take(1)?;
        b.first().copied().ok_or(DecodeError::Truncated {
            offset: self.pos,
            needed: 1,
            available: 0,
        })
    }

    fn u32_be(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(LENGTH_PREFIX)?;
        let arr: [u8; LENGTH_PREFIX] = b.try_into().map_err(|_| DecodeError::Truncated {
            offset: self.pos,
            needed: LENGTH_PREFIX,
            available: b.len(),
        })?;
        Ok(u32::from_be_bytes(arr))
    }
}

impl SignatureFile {
    /// Parses the record sequence in a single linear scan.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = Reader { buf: bytes, pos: 0 };
        let mut fields = Vec::new();
        while reader.pos + 1 < bytes.len() {
            let offset = reader.pos;
            match reader.u8()? {
                TYPE_FILE_HASH => {
                    let raw = reader.take(HASH_SIZE)?;
                    let hash = FileHash::from_slice(raw).ok_or(DecodeError::Truncated {
                        offset: offset + 1,
                        needed: HASH_SIZE,
                        available: raw.len(),
                    })?;
                    fields.push(SignatureField::Hash(hash));
                }
                TYPE_SIGNATURE => {
                    let len = reader.u32_be()? as usize;
                    let sig = reader.take(len)?;
                    fields.push(SignatureField::Signature(sig.to_vec()));
                }
                tag => return Err(DecodeError::UnexpectedTag { tag, offset }),
            }
        }
        Ok(Self { fields })
    }

    /// The records in file order.
    pub fn fields(&self) -> &[SignatureField] {
        &self.fields
    }

    /// The last hash record, if any.
    pub fn hash(&self) -> Option<&FileHash> {
        self.fields.iter().rev().find_map(|f| match f {
            SignatureField::Hash(h) => Some(h),
            SignatureField::Signature(_) => None,
        })
    }

    /// The last signature record, if any.
    pub fn signature(&self) -> Option<&[u8]> {
        self.fields.iter().rev().find_map(|f| match f {
            SignatureField::Signature(s) => Some(s.as_slice()),
            SignatureField::Hash(_) => None,
        })
    }

    /// Re-encodes the records in their original order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for field in &self.fields {
            match field {
                SignatureField::Hash(hash) => {
                    out.push(TYPE_FILE_HASH);
                    out.extend_from_slice(hash.as_bytes());
                }
                SignatureField::Signature(sig) => {
                    out.push(TYPE_SIGNATURE);
                    out.extend_from_slice(&(sig.len() as u32).to_be_bytes());
                    out.extend_from_slice(sig);
                }
            }
        }
        out
    }

    /// Converts into the node's artifact, requiring both a hash and a signature.
    pub fn into_artifact(self, node: NodeRef) -> Result<SignatureArtifact, DecodeError> {
        let hash = *self.hash().ok_or(DecodeError::MissingField("file hash"))?;
        let signature = self
            .signature()
            .ok_or(DecodeError::MissingField("signature"))?
            .to_vec();
        Ok(SignatureArtifact {
            node,
            hash,
            signature,
        })
    }
}

/// Decodes a node's signature file into its artifact.
pub fn decode(node: NodeRef, bytes: &[u8]) -> Result<SignatureArtifact, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty("signature file"));
    }
    SignatureFile::parse(bytes)?.into_artifact(node)
}

/// Encodes a signature file in the canonical hash-then-signature layout.
pub fn encode_signature_file(hash: &FileHash, signature: &[u8]) -> Vec<u8> {
    SignatureFile {
        fields: vec![
            SignatureField::Hash(*hash),
            SignatureField::Signature(signature.to_vec()),
        ],
    }
    .to_bytes()
}
