use crate::model::{CalibratedReading, RawReading};
use crate::prelude::Calibration;

impl Calibration {
    pub fn new(scale: f64, offset: f64) -> Self {
        Self { scale, offset }
    }

    /// `scale * raw + offset`.
    pub fn calibrate(&self, raw: f64) -> f64 {
        self.scale * raw + self.offset
    }

    pub fn apply(&self, reading: RawReading) -> CalibratedReading {
        let calibrated_rssi = self.calibrate(reading.rssi);
        CalibratedReading {
            timestamp: reading.timestamp,
            label: reading.label,
            measured_rssi: reading.rssi,
            calibrated_rssi,
        }
    }
}

/// Calibrates with the default survey constants.
pub fn calibrate(raw: f64) -> f64 {
    Calibration::default().calibrate(raw)
}
