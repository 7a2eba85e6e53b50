// Path: crates/cli/src/commands/inspect.rs

use crate::output::{read_json, write_json};
use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use stateproof_crypto::algorithms::hash::key_fingerprint;
use stateproof_types::app::{NodeDirectory, NodeDirectoryChain, NodeRef, ProofBundle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Path to a proof bundle produced by `prove`.
    #[clap(long)]
    pub bundle: PathBuf,
}

/// One address book snapshot, oldest first.
#[derive(Debug, Serialize)]
pub struct SnapshotSummary {
    pub index: usize,
    pub declared_node_count: usize,
    pub nodes: Vec<NodeSummary>,
}

#[derive(Debug, Serialize)]
pub struct NodeSummary {
    pub node: NodeRef,
    /// Number of RSA keys behind the entry; greater than one for key lists.
    pub keys: usize,
    pub fingerprint: String,
    /// Whether the bundle carries a signature file from this node.
    pub signed: bool,
}

pub fn run(args: InspectArgs) -> Result<()> {
    write_json(&inspect(&args)?, None)
}

pub fn inspect(args: &InspectArgs) -> Result<Vec<SnapshotSummary>> {
    let bundle: ProofBundle = read_json(&args.bundle)?;
    let chain = NodeDirectoryChain::decode(bundle.address_books())?;
    chain
        .snapshots()
        .iter()
        .enumerate()
        .map(|(index, directory)| summarize(index, directory, &bundle))
        .collect()
}

fn summarize(index: usize, directory: &NodeDirectory, bundle: &ProofBundle) -> Result<SnapshotSummary> {
    let nodes = directory
        .entries()
        .iter()
        .map(|entry| {
            Ok(NodeSummary {
                node: entry.node.clone(),
                keys: entry.key.single_keys().len(),
                fingerprint: key_fingerprint(&entry.key)?,
                signed: bundle.signature_files().contains_key(&entry.node),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(SnapshotSummary {
        index,
        declared_node_count: directory.declared_node_count(),
        nodes,
    })
}
