// Path: crates/api/src/ledger/mod.rs

//! API for the relational ledger lookups that precede proof assembly.

use crate::error::LedgerError;
use async_trait::async_trait;
use stateproof_types::app::{AddressBookRow, ConsensusRecordLocator, TransactionId};

/// Resolves transactions to record files and timestamps to address books.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Returns every finalized record matching the transaction.
    ///
    /// Exactly one match is expected; callers treat zero as not found and more
    /// than one as corrupt data.
    async fn find_finalized_records(
        &self,
        transaction_id: &TransactionId,
        nonce: u32,
        scheduled: bool,
    ) -> Result<Vec<ConsensusRecordLocator>, LedgerError>;

    /// Returns the address book snapshots in effect at or before
    /// `consensus_timestamp`, ordered oldest to newest.
    async fn find_address_book_chain(
        &self,
        consensus_timestamp: i64,
    ) -> Result<Vec<AddressBookRow>, LedgerError>;
}
