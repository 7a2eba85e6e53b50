// Path: crates/services/tests/end_to_end.rs
//! Assembles a proof from stored artifacts, ships it as JSON and verifies it
//! on the other side with nothing but the bundle.

use stateproof_consensus::{ConsensusVerifier, Sha384RecordCodec};
use stateproof_services::ProofAssembler;
use stateproof_storage::{
    LedgerRecord, LedgerSnapshot, MemoryLedger, MemoryObjectStore, ObjectKeyLayout,
};
use stateproof_test_utils::fixtures::{record_hash, TestNetwork};
use stateproof_types::app::{ConsensusRecordLocator, NodeRef, ProofBundle, TransactionId};
use stateproof_types::config::StateProofConfig;
use std::sync::Arc;

const FILE: &str = "2022-07-01T12_00_00.000000000Z.rcd";

fn setup(signers: &[usize], signed_content: &[u8], served_content: &[u8]) -> (MemoryLedger, Arc<MemoryObjectStore>, StateProofConfig) {
    let net = TestNetwork::new(5);
    let config = StateProofConfig::new("testnet-streams");
    let layout = ObjectKeyLayout::from(&config.layout);

    let store = Arc::new(MemoryObjectStore::new());
    store.restore(
        &config.bucket_name,
        layout.record_file(&NodeRef::Id(5), FILE),
        served_content.to_vec(),
    );
    for (node, bytes) in net.signature_files(signers, &record_hash(signed_content)) {
        store.restore(&config.bucket_name, layout.signature_file(&node, FILE), bytes);
    }

    let snapshot = LedgerSnapshot {
        records: vec![LedgerRecord {
            transaction_id: "0.0.98@1656676800.5".parse().unwrap(),
            nonce: 0,
            scheduled: true,
            locator: ConsensusRecordLocator {
                consensus_timestamp: 1_656_676_801_000_000_000,
                file_name: FILE.to_string(),
                version: 6,
                node: NodeRef::Id(5),
                content: None,
            },
        }],
        address_books: vec![net.address_book_row(1)],
    };
    let json = serde_json::to_string(&snapshot).unwrap();
    (MemoryLedger::from_json(&json).unwrap(), store, config)
}

async fn prove_and_ship(
    ledger: MemoryLedger,
    store: Arc<MemoryObjectStore>,
    config: &StateProofConfig,
) -> ProofBundle {
    let tx: TransactionId = "0.0.98-1656676800-500000000".parse().unwrap();
    let bundle = ProofAssembler::new(ledger, store, Sha384RecordCodec, config)
        .build_proof(&tx, 0, true)
        .await
        .unwrap();
    let json = serde_json::to_string(&bundle).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[tokio::test]
async fn assembled_bundle_verifies_independently() {
    let (ledger, store, config) = setup(&[0, 2, 4], b"block of records", b"block of records");
    let bundle = prove_and_ship(ledger, store, &config).await;

    let result = ConsensusVerifier::new().verify_bundle(&bundle).unwrap();
    assert!(result.is_valid());
    assert_eq!(result.supporting_nodes, 3);
    assert_eq!(result.total_nodes, 5);
}

#[tokio::test]
async fn served_record_that_differs_from_signed_hash_is_rejected() {
    let (ledger, store, config) = setup(&[0, 1, 2, 3, 4], b"signed", b"tampered");
    let bundle = prove_and_ship(ledger, store, &config).await;

    let result = ConsensusVerifier::new().verify_bundle(&bundle).unwrap();
    assert!(result.quorum_reached);
    assert!(!result.hash_matches);
    assert!(!result.is_valid());
}
