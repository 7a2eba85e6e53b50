// Path: crates/services/src/assembly/mod.rs

//! Proof assembly: from a transaction id to a portable proof bundle.
//!
//! The ledger names the record file and the address books in effect, the
//! gateway fetches every node's signature file concurrently, and the bundle is
//! only produced when at least one third of the nodes delivered one.

use stateproof_api::ledger::LedgerQuery;
use stateproof_api::record::RecordCodec;
use stateproof_api::storage::ObjectStore;
use stateproof_storage::ObjectGateway;
use stateproof_telemetry::time::Timer;
use stateproof_telemetry::{error_metrics, proof_metrics};
use stateproof_types::app::{
    can_reach_quorum, ArtifactKind, ConsensusRecordLocator, NodeDirectory, NodeRef, ProofBundle,
    RecordContent, TransactionId,
};
use stateproof_types::config::StateProofConfig;
use stateproof_types::error::{ErrorCode, ProofError};
use std::collections::BTreeMap;

/// Builds proof bundles from ledger rows and stored record stream files.
pub struct ProofAssembler<L, S, C> {
    ledger: L,
    gateway: ObjectGateway<S>,
    codec: C,
    prefer_compact: bool,
}

impl<L, S, C> ProofAssembler<L, S, C>
where
    L: LedgerQuery,
    S: ObjectStore,
    C: RecordCodec,
{
    pub fn new(ledger: L, store: S, codec: C, config: &StateProofConfig) -> Self {
        Self {
            ledger,
            gateway: ObjectGateway::new(store, config),
            codec,
            prefer_compact: config.prefer_compact,
        }
    }

    /// Assembles the proof bundle for a transaction.
    ///
    /// # Errors
    ///
    /// * `NotFound` when the ledger has no finalized record or no address book.
    /// * `Invariant` when the ledger returns duplicate records, or an address
    ///   book whose node list or serialized directory disagrees with its node
    ///   count.
    /// * `Quorum` when fewer than one third of the signature files download.
    /// * `FileDownload` when the record file cannot be fetched.
    pub async fn build_proof(
        &self,
        transaction_id: &TransactionId,
        nonce: u32,
        scheduled: bool,
    ) -> Result<ProofBundle, ProofError> {
        let result = self.assemble(transaction_id, nonce, scheduled).await;
        match &result {
            Ok(bundle) => {
                proof_metrics().inc_proofs_assembled("ok");
                tracing::info!(
                    target: "assembly",
                    %transaction_id,
                    nonce,
                    scheduled,
                    signatures = bundle.signature_files().len(),
                    compact = bundle.record().is_compact(),
                    "assembled proof bundle"
                );
            }
            Err(e) => {
                proof_metrics().inc_proofs_assembled(e.code());
                error_metrics().inc_error("proof", e.code());
                tracing::warn!(target: "assembly", %transaction_id, nonce, scheduled, error = %e, "proof assembly failed");
            }
        }
        result
    }

    async fn assemble(
        &self,
        transaction_id: &TransactionId,
        nonce: u32,
        scheduled: bool,
    ) -> Result<ProofBundle, ProofError> {
        let locator = self
            .find_record(transaction_id, nonce, scheduled)
            .await?;

        let mut chain = self
            .ledger
            .find_address_book_chain(locator.consensus_timestamp)
            .await?;
        chain.sort_by_key(|row| row.start_consensus_timestamp);
        let latest = chain.last().ok_or_else(|| {
            ProofError::NotFound(format!(
                "address book in effect at consensus timestamp {}",
                locator.consensus_timestamp
            ))
        })?;
        if latest.nodes.len() != latest.node_count {
            return Err(ProofError::Invariant(format!(
                "address book starting at {} lists {} nodes but records a node count of {}",
                latest.start_consensus_timestamp,
                latest.nodes.len(),
                latest.node_count
            )));
        }
        NodeDirectory::decode(&latest.file_data)
            .and_then(|directory| directory.ensure_node_count(latest.node_count))
            .map_err(|e| {
                ProofError::Invariant(format!(
                    "address book starting at {} disagrees with its ledger row: {e}",
                    latest.start_consensus_timestamp
                ))
            })?;
        let nodes = latest.nodes.clone();

        let signature_files = self.fetch_signature_files(&nodes, &locator.file_name).await?;
        let content = self.record_content(&locator).await?;
        let record = self.shape_record(content, transaction_id, nonce, scheduled)?;

        let address_books = chain.into_iter().map(|row| row.file_data).collect();
        Ok(ProofBundle::new(
            record,
            address_books,
            signature_files,
            locator.version,
        ))
    }

    async fn find_record(
        &self,
        transaction_id: &TransactionId,
        nonce: u32,
        scheduled: bool,
    ) -> Result<ConsensusRecordLocator, ProofError> {
        let mut records = self
            .ledger
            .find_finalized_records(transaction_id, nonce, scheduled)
            .await?;
        let count = records.len();
        match (records.pop(), count) {
            (Some(record), 1) => Ok(record),
            (None, _) => Err(ProofError::NotFound(format!(
                "transaction {transaction_id} with nonce {nonce} and scheduled {scheduled}"
            ))),
            (Some(_), n) => Err(ProofError::Invariant(format!(
                "{n} finalized records match transaction {transaction_id}"
            ))),
        }
    }

    async fn fetch_signature_files(
        &self,
        nodes: &[NodeRef],
        file_name: &str,
    ) -> Result<BTreeMap<NodeRef, Vec<u8>>, ProofError> {
        let kind = ArtifactKind::SignatureFile;
        let outcomes = {
            let _timer = Timer::new(proof_metrics(), "fetch_signatures");
            self.gateway.fetch_many(kind, nodes, file_name).await
        };

        let total = outcomes.len();
        let mut files = BTreeMap::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(bytes) => {
                    files.insert(outcome.key, bytes);
                }
                Err(e) => {
                    tracing::debug!(target: "assembly", node = %outcome.key, error = %e, "excluding node without signature file");
                }
            }
        }

        if !can_reach_quorum(files.len(), total) {
            proof_metrics().inc_quorum_failures(kind.as_str());
            return Err(ProofError::Quorum {
                kind,
                actual: files.len(),
                total,
            });
        }
        tracing::debug!(target: "assembly", downloaded = files.len(), total, "signature quorum met");
        Ok(files)
    }

    async fn record_content(&self, locator: &ConsensusRecordLocator) -> Result<Vec<u8>, ProofError> {
        if let Some(content) = locator.content.as_ref().filter(|c| !c.is_empty()) {
            return Ok(content.clone());
        }
        let _timer = Timer::new(proof_metrics(), "fetch_record");
        self.gateway
            .fetch(ArtifactKind::RecordFile, &locator.node, &locator.file_name)
            .await
            .map_err(|e| {
                ProofError::FileDownload(format!(
                    "record file {} from node {}: {e}",
                    locator.file_name, locator.node
                ))
            })
    }

    fn shape_record(
        &self,
        content: Vec<u8>,
        transaction_id: &TransactionId,
        nonce: u32,
        scheduled: bool,
    ) -> Result<RecordContent, ProofError> {
        if self.prefer_compact && self.codec.can_compact(&content) {
            let compact = self
                .codec
                .to_compact_proof(&content, transaction_id, nonce, scheduled)?;
            return Ok(RecordContent::Compact(compact));
        }
        Ok(RecordContent::Full(content))
    }
}
