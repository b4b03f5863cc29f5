use serde::{Deserialize, Serialize};

/// Default slope applied to raw RSSI readings.
pub const DEFAULT_CALIBRATION_SCALE: f64 = 1.57;
/// Default offset (dBm) added after scaling.
pub const DEFAULT_CALIBRATION_OFFSET: f64 = 24.2;
/// Default Gaussian standard deviation, in grid pixels.
pub const DEFAULT_SIGMA: f64 = 20.0;
/// Largest accepted Gaussian standard deviation, in grid pixels. The kernel
/// spans `8 * sigma + 1` taps, so this bounds it at roughly eight thousand.
pub const MAX_SIGMA: f64 = 1_000.0;
/// Largest accepted floorplan area (`height * width`), in pixels.
pub const MAX_GRID_PIXELS: usize = 1 << 27;

/// Affine correction mapping a measured RSSI onto the calibrated dBm scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    pub scale: f64,
    pub offset: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            scale: DEFAULT_CALIBRATION_SCALE,
            offset: DEFAULT_CALIBRATION_OFFSET,
        }
    }
}

/// Shared configuration for a single pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub calibration: Calibration,
    pub sigma: f64,
    /// Largest tolerated difference between coordinate and group counts
    /// before truncation. `None` disables the guard and truncates silently.
    pub max_count_mismatch: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            calibration: Calibration::default(),
            sigma: DEFAULT_SIGMA,
            max_count_mismatch: None,
        }
    }
}

/// Common error type for the survey pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SurveyError {
    #[error("mismatched counts: {coordinates} coordinates vs {values} RSSI values")]
    MismatchedCounts { coordinates: usize, values: usize },
    #[error(
        "count mismatch exceeds tolerance: {coordinates} coordinates vs {values} RSSI values (max difference {tolerance})"
    )]
    CountMismatchExceeded {
        coordinates: usize,
        values: usize,
        tolerance: usize,
    },
    #[error("cannot aggregate an empty group")]
    EmptyGroup,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// Lifecycle shared by the survey processing stages.
pub trait ProcessingStage {
    type Input;
    type Output;

    fn initialize(&mut self, config: &PipelineConfig) -> SurveyResult<()>;
    fn execute(&mut self, input: Self::Input) -> SurveyResult<Self::Output>;
    fn cleanup(&mut self);
}
