// Path: crates/consensus/src/verifier/mod.rs

//! Recomputes node agreement from a proof bundle.

use crate::record::Sha384RecordCodec;
use stateproof_api::crypto::BatchVerifier;
use stateproof_api::record::RecordCodec;
use stateproof_crypto::algorithms::hash::key_fingerprint;
use stateproof_crypto::sign::batch::CpuBatchVerifier;
use stateproof_telemetry::proof_metrics;
use stateproof_telemetry::time::Timer;
use stateproof_types::app::{
    can_reach_quorum, ConsensusResult, FileHash, Key, NodeDirectory, NodeDirectoryChain,
    ProofBundle, SignatureArtifact,
};
use stateproof_types::codec::decode_signature_file;
use stateproof_types::error::{DecodeError, VerifyError};
use std::collections::BTreeMap;

/// Checks signature files against a node directory and the record content.
#[derive(Debug, Default)]
pub struct ConsensusVerifier<C = Sha384RecordCodec, B = CpuBatchVerifier> {
    codec: C,
    batch: B,
}

impl ConsensusVerifier {
    /// A verifier with the flat SHA-384 codec and the rayon batch verifier.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: RecordCodec, B: BatchVerifier> ConsensusVerifier<C, B> {
    pub fn with_parts(codec: C, batch: B) -> Self {
        Self { codec, batch }
    }

    /// Verifies `bundle` against the directory carried in the bundle itself,
    /// using its most recent snapshot.
    pub fn verify_bundle(&self, bundle: &ProofBundle) -> Result<ConsensusResult, VerifyError> {
        let chain = NodeDirectoryChain::decode(bundle.address_books())?;
        let directory = chain
            .latest()
            .ok_or(DecodeError::Empty("node directory chain"))?;
        self.verify(bundle, directory)
    }

    /// Verifies `bundle` against `directory`.
    ///
    /// Any malformed signature file aborts verification. Signatures from nodes
    /// outside the directory, and signatures that fail to verify, are left out
    /// of the tally. Disagreement is not an error: it yields a result with
    /// `quorum_reached == false`.
    pub fn verify(
        &self,
        bundle: &ProofBundle,
        directory: &NodeDirectory,
    ) -> Result<ConsensusResult, VerifyError> {
        let metrics = proof_metrics();
        let total = directory.len();

        let artifacts = bundle
            .signature_files()
            .iter()
            .map(|(node, bytes)| decode_signature_file(node.clone(), bytes))
            .collect::<Result<Vec<_>, _>>()?;

        let mut candidates: Vec<(&SignatureArtifact, &Key)> = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            match directory.key_for(&artifact.node) {
                Some(key) => candidates.push((artifact, key)),
                None => tracing::debug!(
                    target: "consensus",
                    node = %artifact.node,
                    "signature from node outside the directory, ignoring"
                ),
            }
        }

        let verdicts = {
            let _timer = Timer::new(metrics, "verify_signatures");
            let items: Vec<(&Key, &[u8], &[u8])> = candidates
                .iter()
                .map(|(a, key)| (*key, &a.hash.as_bytes()[..], a.signature.as_slice()))
                .collect();
            self.batch.verify_batch(&items)?
        };

        let mut tally: BTreeMap<FileHash, usize> = BTreeMap::new();
        for ((artifact, key), valid) in candidates.iter().zip(verdicts) {
            if valid {
                *tally.entry(artifact.hash).or_default() += 1;
            } else {
                tracing::warn!(
                    target: "consensus",
                    node = %artifact.node,
                    key = %key_fingerprint(key).unwrap_or_default(),
                    hash = %artifact.hash,
                    "invalid signature, ignoring"
                );
            }
        }

        // Ascending order plus a strict comparison keeps the smallest hash on ties.
        let mut best: Option<(FileHash, usize)> = None;
        for (hash, count) in &tally {
            if best.map_or(true, |(_, c)| *count > c) {
                best = Some((*hash, *count));
            }
        }
        let supporting_nodes = best.map_or(0, |(_, c)| c);
        let quorum_reached = can_reach_quorum(supporting_nodes, total);
        let winning_hash = best.filter(|_| quorum_reached).map(|(h, _)| h);

        let hash_matches = match &winning_hash {
            Some(winner) => {
                let actual = self.codec.hash_of(bundle.record())?;
                if actual != *winner {
                    tracing::warn!(
                        target: "consensus",
                        agreed = %winner,
                        actual = %actual,
                        "agreed hash differs from record content"
                    );
                }
                actual == *winner
            }
            None => false,
        };

        let result = ConsensusResult {
            winning_hash,
            supporting_nodes,
            total_nodes: total,
            quorum_reached,
            hash_matches,
        };
        metrics.set_supporting_nodes(supporting_nodes as u64);
        metrics.inc_verifications(verdict(&result));
        tracing::info!(
            target: "consensus",
            supporting = supporting_nodes,
            total,
            quorum_reached,
            hash_matches,
            "verified proof bundle"
        );
        Ok(result)
    }
}

fn verdict(result: &ConsensusResult) -> &'static str {
    match (result.quorum_reached, result.hash_matches) {
        (true, true) => "valid",
        (true, false) => "hash_mismatch",
        (false, _) => "no_quorum",
    }
}

#[cfg(test)]
mod tests;
