// Path: crates/cli/src/commands/verify.rs

use crate::output::{read_json, write_json};
use anyhow::Result;
use clap::Parser;
use stateproof_consensus::ConsensusVerifier;
use stateproof_types::app::{ConsensusResult, ProofBundle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Path to a proof bundle produced by `prove`.
    #[clap(long)]
    pub bundle: PathBuf,
}

/// Prints the consensus result and returns whether the proof holds.
pub fn run(args: VerifyArgs) -> Result<bool> {
    let result = verify(&args)?;
    write_json(&result, None)?;
    Ok(result.is_valid())
}

pub fn verify(args: &VerifyArgs) -> Result<ConsensusResult> {
    let bundle: ProofBundle = read_json(&args.bundle)?;
    Ok(ConsensusVerifier::new().verify_bundle(&bundle)?)
}
