//! Core pipeline for RSSI site surveys.
//!
//! Turns a label-tagged RSSI log and a list of floorplan pixel coordinates
//! into calibrated per-location averages, a smoothed heatmap grid and a
//! colour band for every measured point.

pub mod math;
pub mod model;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use model::{ColorBand, Coordinate};
pub use prelude::{Calibration, PipelineConfig, ProcessingStage, SurveyError, SurveyResult};
pub use processing::{SurveyInput, SurveyOutput, SurveyPipeline};
