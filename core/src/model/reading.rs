use serde::{Deserialize, Serialize};

/// A single validated row of the survey log, before calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    pub timestamp: String,
    pub label: String,
    pub rssi: f64,
}

/// Reading on the calibrated dBm scale. The timestamp and measured value
/// travel along for persistence only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratedReading {
    pub timestamp: String,
    pub label: String,
    pub measured_rssi: f64,
    pub calibrated_rssi: f64,
}

/// Maximal contiguous run of readings that share a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    label: String,
    values: Vec<f64>,
}

impl Group {
    /// Opens a run with its first value; a group can never be empty.
    pub fn start(label: impl Into<String>, first: f64) -> Self {
        Self {
            label: label.into(),
            values: vec![first],
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
