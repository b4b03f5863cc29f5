use crate::model::{CalibratedReading, RawReading};
use crate::prelude::Calibration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the survey log exactly as read from the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogRow {
    /// 1-based line number in the source file, header included.
    pub line: usize,
    pub timestamp: Option<String>,
    pub label: Option<String>,
    pub value: Option<String>,
}

impl LogRow {
    pub fn new(line: usize, timestamp: &str, label: &str, value: &str) -> Self {
        Self {
            line,
            timestamp: Some(timestamp.to_string()),
            label: Some(label.to_string()),
            value: Some(value.to_string()),
        }
    }
}

/// Which stage of the log the `value` column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueColumn {
    /// Measured RSSI that still needs calibration (`rssi`).
    #[default]
    Raw,
    /// Already calibrated (`calibrated_rssi`); used as-is.
    Calibrated,
}

impl ValueColumn {
    pub fn header(self) -> &'static str {
        match self {
            ValueColumn::Raw => "rssi",
            ValueColumn::Calibrated => "calibrated_rssi",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingLabel,
    MissingValue,
    NonNumeric(String),
    NonFinite,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingLabel => write!(f, "missing label"),
            SkipReason::MissingValue => write!(f, "missing RSSI value"),
            SkipReason::NonNumeric(text) => write!(f, "non-numeric RSSI value {:?}", text),
            SkipReason::NonFinite => write!(f, "non-finite RSSI value"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: SkipReason,
}

/// Outcome of validating and calibrating a whole log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub readings: Vec<CalibratedReading>,
    pub skipped: Vec<SkippedRow>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Checks a row for the fields the pipeline needs.
pub fn validate_row(row: &LogRow) -> Result<RawReading, SkipReason> {
    let label = present(&row.label).ok_or(SkipReason::MissingLabel)?;
    let text = present(&row.value).ok_or(SkipReason::MissingValue)?;
    let rssi: f64 = text
        .parse()
        .map_err(|_| SkipReason::NonNumeric(text.to_string()))?;
    if !rssi.is_finite() {
        return Err(SkipReason::NonFinite);
    }
    Ok(RawReading {
        timestamp: row
            .timestamp
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        label: label.to_string(),
        rssi,
    })
}

/// Validates every row, calibrating raw values and passing calibrated ones
/// through. Invalid rows are reported and never reach segmentation.
pub fn ingest<I>(rows: I, column: ValueColumn, calibration: &Calibration) -> IngestReport
where
    I: IntoIterator<Item = LogRow>,
{
    let mut report = IngestReport::default();
    for row in rows {
        match validate_row(&row) {
            Ok(reading) => {
                let calibrated = match column {
                    ValueColumn::Raw => calibration.apply(reading),
                    ValueColumn::Calibrated => CalibratedReading {
                        timestamp: reading.timestamp,
                        label: reading.label,
                        measured_rssi: reading.rssi,
                        calibrated_rssi: reading.rssi,
                    },
                };
                report.readings.push(calibrated);
            }
            Err(reason) => report.skipped.push(SkippedRow {
                line: row.line,
                reason,
            }),
        }
    }
    report
}
