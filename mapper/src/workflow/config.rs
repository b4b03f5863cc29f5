use anyhow::Context;
use rssicore::prelude::{
    Calibration, PipelineConfig, DEFAULT_CALIBRATION_OFFSET, DEFAULT_CALIBRATION_SCALE,
    DEFAULT_SIGMA,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub scale: f64,
    pub offset: f64,
    pub sigma: f64,
    pub max_count_mismatch: Option<usize>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_CALIBRATION_SCALE,
            offset: DEFAULT_CALIBRATION_OFFSET,
            sigma: DEFAULT_SIGMA,
            max_count_mismatch: None,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(sigma: f64, max_count_mismatch: Option<usize>) -> Self {
        Self {
            sigma,
            max_count_mismatch,
            ..Default::default()
        }
    }

    pub fn calibration(&self) -> Calibration {
        Calibration::new(self.scale, self.offset)
    }

    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            calibration: self.calibration(),
            sigma: self.sigma,
            max_count_mismatch: self.max_count_mismatch,
        }
    }
}
