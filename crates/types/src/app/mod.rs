// Path: crates/types/src/app/mod.rs
//! Core data structures shared by proof assembly and verification.

/// The portable proof bundle and its JSON wire form.
pub mod bundle;
/// Signature artifacts, retrieval outcomes, consensus results and the quorum rule.
pub mod consensus;
/// Node references, keys and node directories.
pub mod directory;
/// Entity and transaction identifiers.
pub mod identity;
/// Record locators, address book rows and record content.
pub mod record;

pub use bundle::*;
pub use consensus::*;
pub use directory::*;
pub use identity::*;
pub use record::*;

/// Serde helpers that carry byte vectors as standard base64 strings.
pub mod b64 {
    use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes bytes as a base64 string.
    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&B64.encode(bytes))
    }

    /// Deserializes a base64 string into bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        B64.decode(s.as_bytes()).map_err(serde::de::Error::custom)
    }

    /// The same encoding for optional byte fields.
    pub mod option {
        use super::B64;
        use base64::Engine as _;
        use serde::{Deserialize, Deserializer, Serializer};

        /// Serializes optional bytes as an optional base64 string.
        pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
            match bytes {
                Some(b) => s.serialize_some(&B64.encode(b)),
                None => s.serialize_none(),
            }
        }

        /// Deserializes an optional base64 string.
        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|s| B64.decode(s.as_bytes()).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
