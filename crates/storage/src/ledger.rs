// Path: crates/storage/src/ledger.rs

//! A ledger query backend over an in-memory snapshot.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stateproof_api::ledger::LedgerQuery;
use stateproof_types::app::{AddressBookRow, ConsensusRecordLocator, TransactionId};
use stateproof_types::error::LedgerError;
use std::path::Path;

/// A finalized transaction and the record file that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// The transaction as submitted.
    pub transaction_id: TransactionId,
    /// Nonce of a child transaction, zero for the parent.
    #[serde(default)]
    pub nonce: u32,
    /// Whether this is the scheduled execution of the transaction.
    #[serde(default)]
    pub scheduled: bool,
    /// Where the finalized record lives.
    pub locator: ConsensusRecordLocator,
}

/// The ledger rows needed to assemble proofs, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Finalized transactions.
    #[serde(default)]
    pub records: Vec<LedgerRecord>,
    /// Address book rows in any order.
    #[serde(default)]
    pub address_books: Vec<AddressBookRow>,
}

/// Answers [`LedgerQuery`] from a [`LedgerSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    snapshot: LedgerSnapshot,
}

impl MemoryLedger {
    /// A ledger answering from `snapshot`.
    pub fn new(snapshot: LedgerSnapshot) -> Self {
        Self { snapshot }
    }

    /// Parses a JSON [`LedgerSnapshot`].
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|e| LedgerError::MalformedRow(e.to_string()))
    }

    /// Reads and parses a JSON [`LedgerSnapshot`] file.
    pub fn from_path(path: &Path) -> Result<Self, LedgerError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Backend(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }
}

#[async_trait]
impl LedgerQuery for MemoryLedger {
    async fn find_finalized_records(
        &self,
        transaction_id: &TransactionId,
        nonce: u32,
        scheduled: bool,
    ) -> Result<Vec<ConsensusRecordLocator>, LedgerError> {
        Ok(self
            .snapshot
            .records
            .iter()
            .filter(|r| {
                r.transaction_id.payer() == transaction_id.payer()
                    && r.transaction_id.valid_start_ns() == transaction_id.valid_start_ns()
                    && r.nonce == nonce
                    && r.scheduled == scheduled
            })
            .map(|r| r.locator.clone())
            .collect())
    }

    async fn find_address_book_chain(
        &self,
        consensus_timestamp: i64,
    ) -> Result<Vec<AddressBookRow>, LedgerError> {
        let mut rows: Vec<AddressBookRow> = self
            .snapshot
            .address_books
            .iter()
            .filter(|row| row.start_consensus_timestamp <= consensus_timestamp)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.start_consensus_timestamp);
        Ok(rows)
    }
}
