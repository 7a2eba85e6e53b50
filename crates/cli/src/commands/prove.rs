// Path: crates/cli/src/commands/prove.rs

use crate::output::write_json;
use anyhow::{Context, Result};
use clap::Parser;
use stateproof_api::storage::ObjectStore;
use stateproof_consensus::Sha384RecordCodec;
use stateproof_services::ProofAssembler;
use stateproof_storage::{HttpObjectStore, MemoryLedger, MemoryObjectStore};
use stateproof_types::app::{ProofBundle, TransactionId};
use stateproof_types::config::StateProofConfig;
use std::path::{Path, PathBuf};

/// Endpoints with this scheme are served from a local directory tree.
const LOCAL_SCHEME: &str = "file://";

#[derive(Parser, Debug)]
pub struct ProveArgs {
    /// Path to the `stateproof.toml` configuration.
    #[clap(long)]
    pub config: PathBuf,

    /// Path to a JSON ledger snapshot with finalized records and address books.
    #[clap(long)]
    pub ledger: PathBuf,

    /// Transaction id, as `0.0.1234-1617000000-000000123` or `0.0.1234@1617000000.000000123`.
    #[clap(long)]
    pub transaction_id: TransactionId,

    #[clap(long, default_value_t = 0)]
    pub nonce: u32,

    #[clap(long)]
    pub scheduled: bool,

    /// Write the bundle here instead of stdout.
    #[clap(long)]
    pub out: Option<PathBuf>,
}

pub async fn run(args: ProveArgs) -> Result<()> {
    let bundle = prove(&args).await?;
    write_json(&bundle, args.out.as_deref())
}

/// Assembles the proof bundle described by `args`.
pub async fn prove(args: &ProveArgs) -> Result<ProofBundle> {
    let config = load_config(&args.config)?;
    let ledger = MemoryLedger::from_path(&args.ledger)
        .with_context(|| format!("failed to load ledger {}", args.ledger.display()))?;

    match config.object_store.endpoint.strip_prefix(LOCAL_SCHEME) {
        Some(root) => {
            let store = MemoryObjectStore::new();
            let loaded = store
                .load_directory(&config.bucket_name, Path::new(root))
                .with_context(|| format!("failed to load objects from {root}"))?;
            tracing::info!(target: "cli", root, loaded, "serving objects from local directory");
            assemble(ledger, store, &config, args).await
        }
        None => {
            let store = HttpObjectStore::new(&config.object_store)?;
            assemble(ledger, store, &config, args).await
        }
    }
}

async fn assemble<S: ObjectStore>(
    ledger: MemoryLedger,
    store: S,
    config: &StateProofConfig,
    args: &ProveArgs,
) -> Result<ProofBundle> {
    let assembler = ProofAssembler::new(ledger, store, Sha384RecordCodec, config);
    let bundle = assembler
        .build_proof(&args.transaction_id, args.nonce, args.scheduled)
        .await?;
    Ok(bundle)
}

/// Reads a TOML configuration file.
pub fn load_config(path: &Path) -> Result<StateProofConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))
}
