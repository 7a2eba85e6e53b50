// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_gauge, register_histogram_vec, register_int_counter,
    register_int_counter_vec, Encoder, Gauge, HistogramVec, IntCounter, IntCounterVec,
    TextEncoder,
};

// --- Metric Statics ---
// Collectors are registered exactly once by `install`.

static FETCH_OBJECTS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static FETCH_BYTES_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static FETCH_DURATION_SECONDS: OnceCell<HistogramVec> = OnceCell::new();
static PROOFS_ASSEMBLED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static QUORUM_FAILURES_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static VERIFICATIONS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static SUPPORTING_NODES: OnceCell<Gauge> = OnceCell::new();
static STAGE_DURATION_SECONDS: OnceCell<HistogramVec> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

static PROMETHEUS_SINK: PrometheusSink = PrometheusSink;

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Runs the body against a collector, skipping it when `install()` has not run.
macro_rules! with_metric {
    ($metric:ident, |$m:ident| $body:expr) => {
        if let Some($m) = $metric.get() {
            $body;
        }
    };
}

impl FetchMetricsSink for PrometheusSink {
    fn inc_objects_fetched(&self, kind: &str, outcome: &'static str) {
        with_metric!(FETCH_OBJECTS_TOTAL, |m| m
            .with_label_values(&[kind, outcome])
            .inc());
    }
    fn inc_bytes_fetched(&self, bytes: u64) {
        with_metric!(FETCH_BYTES_TOTAL, |m| m.inc_by(bytes));
    }
    fn observe_fetch_duration(&self, kind: &str, duration_secs: f64) {
        with_metric!(FETCH_DURATION_SECONDS, |m| m
            .with_label_values(&[kind])
            .observe(duration_secs));
    }
}

impl ProofMetricsSink for PrometheusSink {
    fn inc_proofs_assembled(&self, outcome: &'static str) {
        with_metric!(PROOFS_ASSEMBLED_TOTAL, |m| m
            .with_label_values(&[outcome])
            .inc());
    }
    fn inc_quorum_failures(&self, kind: &str) {
        with_metric!(QUORUM_FAILURES_TOTAL, |m| m.with_label_values(&[kind]).inc());
    }
    fn inc_verifications(&self, verdict: &'static str) {
        with_metric!(VERIFICATIONS_TOTAL, |m| m.with_label_values(&[verdict]).inc());
    }
    fn set_supporting_nodes(&self, count: u64) {
        with_metric!(SUPPORTING_NODES, |m| m.set(count as f64));
    }
    fn observe_stage_duration(&self, stage: &'static str, duration_secs: f64) {
        with_metric!(STAGE_DURATION_SECONDS, |m| m
            .with_label_values(&[stage])
            .observe(duration_secs));
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        with_metric!(ERRORS_TOTAL, |m| m.with_label_values(&[kind, variant]).inc());
    }
}

fn already_installed() -> prometheus::Error {
    prometheus::Error::Msg("prometheus sink already installed".into())
}

/// Registers all collectors with the default registry and makes
/// [`PrometheusSink`] the global sink.
///
/// Fails if called more than once.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    FETCH_OBJECTS_TOTAL
        .set(register_int_counter_vec!(
            "stateproof_fetch_objects_total",
            "Total object fetches, labeled by artifact kind and outcome.",
            &["kind", "outcome"]
        )?)
        .map_err(|_| already_installed())?;
    FETCH_BYTES_TOTAL
        .set(register_int_counter!(
            "stateproof_fetch_bytes_total",
            "Total bytes downloaded from the object store."
        )?)
        .map_err(|_| already_installed())?;
    FETCH_DURATION_SECONDS
        .set(register_histogram_vec!(
            "stateproof_fetch_duration_seconds",
            "Latency of single object fetches.",
            &["kind"],
            exponential_buckets(0.005, 2.0, 14)?
        )?)
        .map_err(|_| already_installed())?;
    PROOFS_ASSEMBLED_TOTAL
        .set(register_int_counter_vec!(
            "stateproof_proofs_assembled_total",
            "Proof assembly attempts, labeled by outcome.",
            &["outcome"]
        )?)
        .map_err(|_| already_installed())?;
    QUORUM_FAILURES_TOTAL
        .set(register_int_counter_vec!(
            "stateproof_quorum_failures_total",
            "Proof assemblies rejected by the download quorum gate, labeled by artifact kind.",
            &["kind"]
        )?)
        .map_err(|_| already_installed())?;
    VERIFICATIONS_TOTAL
        .set(register_int_counter_vec!(
            "stateproof_verifications_total",
            "Consensus verifications, labeled by verdict.",
            &["verdict"]
        )?)
        .map_err(|_| already_installed())?;
    SUPPORTING_NODES
        .set(register_gauge!(
            "stateproof_supporting_nodes",
            "Nodes backing the winning hash of the last verification."
        )?)
        .map_err(|_| already_installed())?;
    STAGE_DURATION_SECONDS
        .set(register_histogram_vec!(
            "stateproof_stage_duration_seconds",
            "Duration of proof pipeline stages.",
            &["stage"],
            exponential_buckets(0.001, 2.0, 16)?
        )?)
        .map_err(|_| already_installed())?;
    ERRORS_TOTAL
        .set(register_int_counter_vec!(
            "stateproof_errors_total",
            "Total errors, labeled by kind and variant.",
            &["kind", "variant"]
        )?)
        .map_err(|_| already_installed())?;

    let sink: &'static dyn MetricsSink = &PROMETHEUS_SINK;
    SINK.set(sink).map_err(|_| already_installed())?;
    Ok(sink)
}

/// Encodes everything in the default registry in the Prometheus text format.
pub fn render() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buf)?;
    String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
