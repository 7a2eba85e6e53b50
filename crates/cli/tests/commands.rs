// Path: crates/cli/tests/commands.rs
//! Drives the commands against a bucket mirrored into a temporary directory.

use stateproof_cli::commands::inspect::{inspect, InspectArgs};
use stateproof_cli::commands::prove::{load_config, prove, ProveArgs};
use stateproof_cli::commands::verify::{verify, VerifyArgs};
use stateproof_cli::output::write_json;
use stateproof_storage::{LedgerRecord, LedgerSnapshot, ObjectKeyLayout};
use stateproof_test_utils::fixtures::{record_hash, TestNetwork};
use stateproof_types::app::{ConsensusRecordLocator, NodeRef};
use stateproof_types::config::LayoutConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FILE: &str = "2023-01-10T08_15_00.000000000Z.rcd";
const CONTENT: &[u8] = b"record stream file for the cli";

fn put(root: &Path, key: &str, bytes: &[u8]) {
    let path = root.join(key);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

/// Lays out a bucket, a ledger and a config for a four node network where
/// `signers` published signature files.
fn workspace(net: &TestNetwork, signers: &[usize]) -> (TempDir, ProveArgs) {
    let dir = tempfile::tempdir().unwrap();
    let objects = dir.path().join("objects");
    let layout = ObjectKeyLayout::from(&LayoutConfig::default());

    put(&objects, &layout.record_file(&NodeRef::Id(3), FILE), CONTENT);
    for (node, bytes) in net.signature_files(signers, &record_hash(CONTENT)) {
        put(&objects, &layout.signature_file(&node, FILE), &bytes);
    }

    let snapshot = LedgerSnapshot {
        records: vec![LedgerRecord {
            transaction_id: "0.0.2001-1673338500-000000042".parse().unwrap(),
            nonce: 0,
            scheduled: false,
            locator: ConsensusRecordLocator {
                consensus_timestamp: 1_673_338_501_000_000_000,
                file_name: FILE.to_string(),
                version: 6,
                node: NodeRef::Id(3),
                content: None,
            },
        }],
        address_books: vec![net.address_book_row(1_600_000_000_000_000_000)],
    };
    let ledger = dir.path().join("ledger.json");
    write_json(&snapshot, Some(&ledger)).unwrap();

    let config = dir.path().join("stateproof.toml");
    std::fs::write(
        &config,
        format!(
            "bucket_name = \"cli-bucket\"\n\n[object_store]\nendpoint = \"file://{}\"\n",
            objects.display()
        ),
    )
    .unwrap();

    let args = ProveArgs {
        config,
        ledger,
        transaction_id: "0.0.2001@1673338500.000000042".parse().unwrap(),
        nonce: 0,
        scheduled: false,
        out: Some(dir.path().join("bundle.json")),
    };
    (dir, args)
}

fn bundle_path(args: &ProveArgs) -> PathBuf {
    args.out.clone().unwrap()
}

#[tokio::test]
async fn prove_then_verify_from_files() {
    let net = TestNetwork::new(4);
    let (_dir, args) = workspace(&net, &[0, 1, 3]);

    let bundle = prove(&args).await.unwrap();
    assert_eq!(bundle.signature_files().len(), 3);
    write_json(&bundle, args.out.as_deref()).unwrap();

    let result = verify(&VerifyArgs {
        bundle: bundle_path(&args),
    })
    .unwrap();
    assert!(result.is_valid());
    assert_eq!(result.supporting_nodes, 3);
    assert_eq!(result.total_nodes, 4);
}

#[tokio::test]
async fn prove_fails_without_quorum() {
    let net = TestNetwork::new(4);
    let (_dir, args) = workspace(&net, &[2]);

    let err = prove(&args).await.unwrap_err();
    assert!(err.to_string().contains("got 1 out of 4"), "{err}");
}

#[tokio::test]
async fn inspect_lists_each_node_and_who_signed() {
    let net = TestNetwork::new(4);
    let (_dir, args) = workspace(&net, &[0, 1]);
    let bundle = prove(&args).await.unwrap();
    write_json(&bundle, args.out.as_deref()).unwrap();

    let snapshots = inspect(&InspectArgs {
        bundle: bundle_path(&args),
    })
    .unwrap();
    assert_eq!(snapshots.len(), 1);
    let snapshot = &snapshots[0];
    assert_eq!(snapshot.declared_node_count, 4);
    let signed: Vec<_> = snapshot
        .nodes
        .iter()
        .map(|n| (n.node.clone(), n.signed, n.keys))
        .collect();
    assert_eq!(
        signed,
        vec![
            (NodeRef::Id(3), true, 1),
            (NodeRef::Id(4), true, 1),
            (NodeRef::Id(5), false, 1),
            (NodeRef::Id(6), false, 1),
        ]
    );
    assert!(snapshot.nodes.iter().all(|n| n.fingerprint.len() == 16));
}

#[test]
fn config_defaults_apply_to_missing_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stateproof.toml");
    std::fs::write(&path, "bucket_name = \"mainnet\"\nprefer_compact = true\n").unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.bucket_name, "mainnet");
    assert!(config.prefer_compact);
    assert_eq!(config.object_store.max_concurrency, 64);
}

#[test]
fn verify_reports_unreadable_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundle.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = verify(&VerifyArgs { bundle: path }).unwrap_err();
    assert!(err.to_string().contains("failed to parse"));
}
