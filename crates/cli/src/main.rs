// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # stateproof
//!
//! Assembles state proofs from a ledger and an object store, and verifies them
//! offline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stateproof_cli::commands::{inspect, prove, verify};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(
    name = "stateproof",
    version,
    about = "Assemble and verify record stream state proofs.",
    long_about = "Builds a portable proof bundle for a transaction from node signature files and address books, and checks such bundles against the one-third quorum rule."
)]
struct Cli {
    /// Write Prometheus metrics in text format to this file on exit.
    #[clap(long, global = true)]
    metrics_out: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble the proof bundle for a transaction.
    Prove(prove::ProveArgs),

    /// Verify a proof bundle. Exits non-zero when the proof does not hold.
    Verify(verify::VerifyArgs),

    /// Print the node directories carried in a proof bundle.
    InspectDirectory(inspect::InspectArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    stateproof_telemetry::init_tracing("info")?;
    if cli.metrics_out.is_some() {
        stateproof_telemetry::install_prometheus_sink()?;
    }

    let code = match cli.command {
        Commands::Prove(args) => prove::run(args).await.map(|()| ExitCode::SUCCESS),
        Commands::Verify(args) => verify::run(args).map(|valid| {
            if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }),
        Commands::InspectDirectory(args) => inspect::run(args).map(|()| ExitCode::SUCCESS),
    };

    if let Some(path) = &cli.metrics_out {
        let text = stateproof_telemetry::prometheus::render()?;
        std::fs::write(path, text)
            .with_context(|| format!("failed to write metrics to {}", path.display()))?;
    }
    code
}
