use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Running totals across pipeline runs, shareable between threads.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub runs: usize,
    pub rows_accepted: usize,
    pub rows_skipped: usize,
    pub samples_out_of_bounds: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_run(&self, accepted: usize, skipped: usize, out_of_bounds: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.runs += 1;
            metrics.rows_accepted += accepted;
            metrics.rows_skipped += skipped;
            metrics.samples_out_of_bounds += out_of_bounds;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
