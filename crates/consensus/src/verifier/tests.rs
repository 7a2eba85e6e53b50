// Path: crates/consensus/src/verifier/tests.rs
use super::*;
use stateproof_test_utils::fixtures::{record_hash, TestNetwork};
use stateproof_types::app::{NodeRef, RecordContent};
use stateproof_types::codec::encode_signature_file;

const CONTENT: &[u8] = b"record stream file contents";

fn directory(net: &TestNetwork) -> NodeDirectory {
    NodeDirectory::decode(&net.address_book()).unwrap()
}

#[test]
fn three_of_four_agreeing_on_content_hash_is_valid() {
    let net = TestNetwork::new(4);
    let bundle = net.bundle(CONTENT, &[0, 1, 2]);

    let result = ConsensusVerifier::new()
        .verify(&bundle, &directory(&net))
        .unwrap();

    assert!(result.quorum_reached);
    assert!(result.hash_matches);
    assert!(result.is_valid());
    assert_eq!(result.supporting_nodes, 3);
    assert_eq!(result.total_nodes, 4);
    assert_eq!(result.winning_hash, Some(record_hash(CONTENT)));
}

#[test]
fn one_of_four_does_not_reach_quorum() {
    let net = TestNetwork::new(4);
    let bundle = net.bundle(CONTENT, &[2]);

    let result = ConsensusVerifier::new()
        .verify(&bundle, &directory(&net))
        .unwrap();

    assert!(!result.quorum_reached);
    assert!(!result.hash_matches);
    assert_eq!(result.winning_hash, None);
    assert_eq!(result.supporting_nodes, 1);
}

#[test]
fn even_split_picks_smallest_hash() {
    let net = TestNetwork::new(4);
    let a = record_hash(b"first");
    let b = record_hash(b"second");
    let (low, high) = if a < b { (a, b) } else { (b, a) };

    // Give the larger hash to the lower node ids so input order cannot decide.
    let mut files = net.signature_files(&[0, 1], &high);
    files.extend(net.signature_files(&[2, 3], &low));
    let bundle = ProofBundle::new(RecordContent::Full(CONTENT.to_vec()), vec![], files, 6);

    let result = ConsensusVerifier::new()
        .verify(&bundle, &directory(&net))
        .unwrap();

    assert!(result.quorum_reached);
    assert_eq!(result.winning_hash, Some(low));
    assert_eq!(result.supporting_nodes, 2);
    assert!(!result.hash_matches);
}

#[test]
fn agreed_hash_must_match_content() {
    let net = TestNetwork::new(4);
    let signed = net.bundle(b"what the nodes saw", &[0, 1, 2, 3]);
    let tampered = ProofBundle::new(
        RecordContent::Full(b"something else".to_vec()),
        signed.address_books().to_vec(),
        signed.signature_files().clone(),
        signed.version(),
    );

    let result = ConsensusVerifier::new().verify_bundle(&tampered).unwrap();
    assert!(result.quorum_reached);
    assert!(!result.hash_matches);
    assert!(!result.is_valid());
}

#[test]
fn invalid_signatures_and_unknown_nodes_are_excluded() {
    let net = TestNetwork::new(4);
    let hash = record_hash(CONTENT);
    let mut files = net.signature_files(&[0], &hash);
    // Node 4 signs, but with node 5's key.
    files.insert(
        NodeRef::Id(4),
        encode_signature_file(&hash, &net.node(2).sign(hash.as_bytes())),
    );
    // A node that is not in the directory.
    let outsider = TestNetwork::new(6);
    files.insert(NodeRef::Id(8), outsider.node(5).signature_file(&hash));

    let bundle = ProofBundle::new(RecordContent::Full(CONTENT.to_vec()), vec![], files, 6);
    let result = ConsensusVerifier::new()
        .verify(&bundle, &directory(&net))
        .unwrap();

    assert_eq!(result.supporting_nodes, 1);
    assert!(!result.quorum_reached);
}

#[test]
fn malformed_signature_file_aborts() {
    let net = TestNetwork::new(3);
    let mut files = net.signature_files(&[0, 1], &record_hash(CONTENT));
    files.insert(NodeRef::Id(5), vec![9, 0, 0]);
    let bundle = ProofBundle::new(RecordContent::Full(CONTENT.to_vec()), vec![], files, 6);

    let err = ConsensusVerifier::new()
        .verify(&bundle, &directory(&net))
        .unwrap_err();
    assert!(matches!(
        err,
        VerifyError::Decode(DecodeError::UnexpectedTag { tag: 9, offset: 0 })
    ));
}

#[test]
fn verify_bundle_uses_latest_snapshot() {
    let old = TestNetwork::new(1);
    let net = TestNetwork::new(6);
    let mut bundle = net.bundle(CONTENT, &[0, 1]);
    bundle = ProofBundle::new(
        bundle.record().clone(),
        vec![old.address_book(), net.address_book()],
        bundle.signature_files().clone(),
        bundle.version(),
    );

    let result = ConsensusVerifier::new().verify_bundle(&bundle).unwrap();
    assert_eq!(result.total_nodes, 6);
    assert!(result.is_valid());
}

#[test]
fn verify_bundle_requires_a_directory() {
    let net = TestNetwork::new(3);
    let bundle = ProofBundle::new(
        RecordContent::Full(CONTENT.to_vec()),
        vec![],
        net.signature_files(&[0], &record_hash(CONTENT)),
        6,
    );
    assert!(matches!(
        ConsensusVerifier::new().verify_bundle(&bundle),
        Err(VerifyError::Decode(DecodeError::Empty(_)))
    ));
}

#[test]
fn memo_identified_nodes_verify() {
    let net = TestNetwork::new(3).with_memo_identities();
    let bundle = net.bundle(CONTENT, &[1]);
    let result = ConsensusVerifier::new().verify_bundle(&bundle).unwrap();
    assert!(result.is_valid());
    assert_eq!(result.supporting_nodes, 1);
}

#[test]
fn key_list_entries_accept_any_member() {
    let net = TestNetwork::new(3);
    let hash = record_hash(CONTENT);
    let entries = vec![
        stateproof_types::app::NodeDirectoryEntry {
            node: NodeRef::Id(3),
            key: Key::List(vec![
                Key::Single(net.node(1).public_key_der().to_vec()),
                Key::Single(net.node(0).public_key_der().to_vec()),
            ]),
        },
        stateproof_types::app::NodeDirectoryEntry {
            node: NodeRef::Id(4),
            key: Key::Single(net.node(1).public_key_der().to_vec()),
        },
    ];
    let dir = NodeDirectory::new(entries, 2).unwrap();
    let bundle = ProofBundle::new(
        RecordContent::Full(CONTENT.to_vec()),
        vec![],
        net.signature_files(&[0], &hash),
        6,
    );

    let result = ConsensusVerifier::new().verify(&bundle, &dir).unwrap();
    assert_eq!(result.supporting_nodes, 1);
    assert!(result.is_valid());
}
