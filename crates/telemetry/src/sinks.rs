// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns a static reference to the configured error metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured object fetch metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn fetch_metrics() -> &'static dyn FetchMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured proof metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn proof_metrics() -> &'static dyn ProofMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for metrics related to object store retrieval.
pub trait FetchMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for finished fetches, labeled by artifact kind and outcome.
    fn inc_objects_fetched(&self, kind: &str, outcome: &'static str);
    /// Increments the total number of bytes downloaded.
    fn inc_bytes_fetched(&self, bytes: u64);
    /// Observes the latency of a single object fetch, labeled by artifact kind.
    fn observe_fetch_duration(&self, kind: &str, duration_secs: f64);
}
impl FetchMetricsSink for NopSink {
    fn inc_objects_fetched(&self, _kind: &str, _outcome: &'static str) {}
    fn inc_bytes_fetched(&self, _bytes: u64) {}
    fn observe_fetch_duration(&self, _kind: &str, _duration_secs: f64) {}
}

/// A sink for metrics related to proof assembly and verification.
pub trait ProofMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for assembly attempts, labeled by outcome (`ok` or an error code).
    fn inc_proofs_assembled(&self, outcome: &'static str);
    /// Increments a counter for quorum gate failures, labeled by artifact kind.
    fn inc_quorum_failures(&self, kind: &str);
    /// Increments a counter for verifications, labeled by verdict.
    fn inc_verifications(&self, verdict: &'static str);
    /// Sets the gauge for the number of nodes backing the last verified hash.
    fn set_supporting_nodes(&self, count: u64);
    /// Observes the duration of one pipeline stage.
    fn observe_stage_duration(&self, stage: &'static str, duration_secs: f64);
}
impl ProofMetricsSink for NopSink {
    fn inc_proofs_assembled(&self, _outcome: &'static str) {}
    fn inc_quorum_failures(&self, _kind: &str) {}
    fn inc_verifications(&self, _verdict: &'static str) {}
    fn set_supporting_nodes(&self, _count: u64) {}
    fn observe_stage_duration(&self, _stage: &'static str, _duration_secs: f64) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and variant.
    fn inc_error(&self, kind: &'static str, variant: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _variant: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink: FetchMetricsSink + ProofMetricsSink + ErrorMetricsSink {}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T where T: FetchMetricsSink + ProofMetricsSink + ErrorMetricsSink {}
