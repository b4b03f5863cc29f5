use crate::io::floorplan::floorplan_shape;
use crate::io::input::{read_coordinates, read_log};
use crate::workflow::config::WorkflowConfig;
use anyhow::{bail, Context};
use rssicore::processing::{SurveyInput, SurveyOutput, SurveyPipeline, ValueColumn};
use rssicore::ProcessingStage;
use rssicore::telemetry::MetricsRecorder;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a survey's inputs live on disk.
#[derive(Debug, Clone)]
pub struct SurveyFiles {
    pub log: PathBuf,
    pub column: ValueColumn,
    pub coordinates: PathBuf,
    pub floorplan: Option<PathBuf>,
    /// Explicit `(height, width)` used when no floorplan image is given.
    pub shape: Option<(usize, usize)>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<MetricsRecorder> {
        self.metrics.clone()
    }

    pub fn load(&self, files: &SurveyFiles) -> anyhow::Result<SurveyInput> {
        let (height, width) = match (&files.floorplan, files.shape) {
            (Some(path), _) => floorplan_shape(path)?,
            (None, Some(shape)) => shape,
            (None, None) => bail!("either a floorplan image or an explicit grid size is required"),
        };
        let rows = read_log(&files.log, files.column)?;
        let coordinates = read_coordinates(&files.coordinates)?;
        Ok(SurveyInput {
            rows,
            column: files.column,
            coordinates,
            height,
            width,
        })
    }

    pub fn execute(&self, input: SurveyInput) -> anyhow::Result<SurveyOutput> {
        let mut pipeline = SurveyPipeline::new();
        pipeline
            .initialize(&self.config.to_pipeline_config())
            .context("initializing survey pipeline")?;
        let output = pipeline
            .execute(input)
            .context("executing survey pipeline")?;
        pipeline.cleanup();
        self.metrics.record_run(
            output.readings.len(),
            output.skipped.len(),
            output.out_of_bounds,
        );
        Ok(output)
    }
}
