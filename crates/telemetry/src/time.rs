// Path: crates/telemetry/src/time.rs
use crate::sinks::ProofMetricsSink;
use std::time::Instant;

/// Reports the time between its creation and drop as a stage duration.
pub struct Timer<'a> {
    sink: &'a dyn ProofMetricsSink,
    stage: &'static str,
    start: Instant,
}

impl<'a> Timer<'a> {
    pub fn new(sink: &'a dyn ProofMetricsSink, stage: &'static str) -> Self {
        Self {
            sink,
            stage,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.sink
            .observe_stage_duration(self.stage, self.start.elapsed().as_secs_f64());
    }
}
