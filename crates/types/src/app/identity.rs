// Path: crates/types/src/app/identity.rs
//! Entity and transaction identifiers.

use crate::error::TransactionIdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const MAX_NANOS_DIGITS: usize = 9;

/// A `shard.realm.num` ledger entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    /// The shard number.
    pub shard: u64,
    /// The realm number.
    pub realm: u64,
    /// The entity number.
    pub num: u64,
}

impl EntityId {
    /// Creates an entity id from its three components.
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

impl FromStr for EntityId {
    type Err = TransactionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let [shard, realm, num] = parts.as_slice() else {
            return Err(TransactionIdError::EntityId(s.to_string()));
        };
        let parse = |p: &str| {
            if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                return Err(TransactionIdError::EntityId(s.to_string()));
            }
            p.parse::<u64>()
                .map_err(|_| TransactionIdError::EntityId(s.to_string()))
        };
        Ok(Self::new(parse(*shard)?, parse(*realm)?, parse(*num)?))
    }
}

impl TryFrom<String> for EntityId {
    type Error = TransactionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.to_string()
    }
}

/// Identifies a transaction by its payer and valid-start time.
///
/// Accepted string forms are `S.R.N-SECONDS-NANOS` and `S.R.N@SECONDS.NANOS`.
/// The nonce and scheduled flag are carried separately by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionId {
    payer: EntityId,
    valid_start_seconds: i64,
    valid_start_nanos: u32,
}

impl TransactionId {
    /// Creates a transaction id, enforcing the valid-start invariants.
    pub fn new(
        payer: EntityId,
        valid_start_seconds: i64,
        valid_start_nanos: u32,
    ) -> Result<Self, TransactionIdError> {
        if valid_start_seconds < 0 {
            return Err(TransactionIdError::Seconds(valid_start_seconds.to_string()));
        }
        if i64::from(valid_start_nanos) >= NANOS_PER_SECOND {
            return Err(TransactionIdError::Nanos(valid_start_nanos.to_string()));
        }
        let id = Self {
            payer,
            valid_start_seconds,
            valid_start_nanos,
        };
        // The nanosecond timestamp is what the ledger is queried with.
        id.checked_valid_start_ns()
            .ok_or_else(|| TransactionIdError::Seconds(valid_start_seconds.to_string()))?;
        Ok(id)
    }

    /// The paying account.
    pub fn payer(&self) -> EntityId {
        self.payer
    }

    /// Seconds component of the valid-start timestamp.
    pub fn valid_start_seconds(&self) -> i64 {
        self.valid_start_seconds
    }

    /// Nanoseconds component of the valid-start timestamp.
    pub fn valid_start_nanos(&self) -> u32 {
        self.valid_start_nanos
    }

    /// The valid-start timestamp in nanoseconds since the epoch.
    pub fn valid_start_ns(&self) -> i64 {
        // Range checked in `new`.
        self.valid_start_seconds * NANOS_PER_SECOND + i64::from(self.valid_start_nanos)
    }

    fn checked_valid_start_ns(&self) -> Option<i64> {
        self.valid_start_seconds
            .checked_mul(NANOS_PER_SECOND)?
            .checked_add(i64::from(self.valid_start_nanos))
    }
}

fn parse_seconds(s: &str) -> Result<i64, TransactionIdError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TransactionIdError::Seconds(s.to_string()));
    }
    s.parse::<i64>()
        .map_err(|_| TransactionIdError::Seconds(s.to_string()))
}

fn check_nanos_digits(s: &str) -> Result<(), TransactionIdError> {
    if s.is_empty() || s.len() > MAX_NANOS_DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TransactionIdError::Nanos(s.to_string()));
    }
    Ok(())
}

impl FromStr for TransactionId {
    type Err = TransactionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (payer, seconds, nanos) = if let Some((payer, start)) = s.split_once('@') {
            let (seconds, fraction) = start
                .split_once('.')
                .ok_or_else(|| TransactionIdError::Format(s.to_string()))?;
            check_nanos_digits(fraction)?;
            let padded = format!("{fraction:0<9}");
            (payer, seconds, padded)
        } else {
            let parts: Vec<&str> = s.split('-').collect();
            let [payer, seconds, nanos] = parts.as_slice() else {
                return Err(TransactionIdError::Format(s.to_string()));
            };
            check_nanos_digits(nanos)?;
            (*payer, *seconds, (*nanos).to_string())
        };

        let payer: EntityId = payer.parse()?;
        let seconds = parse_seconds(seconds)?;
        let nanos = nanos
            .parse::<u32>()
            .map_err(|_| TransactionIdError::Nanos(nanos.clone()))?;
        Self::new(payer, seconds, nanos)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{:09}",
            self.payer, self.valid_start_seconds, self.valid_start_nanos
        )
    }
}

impl TryFrom<String> for TransactionId {
    type Error = TransactionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TransactionId> for String {
    fn from(value: TransactionId) -> Self {
        value.to_string()
    }
}
