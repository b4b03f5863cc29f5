use crate::model::{CalibratedReading, ClassifiedSample, ColorBand, Coordinate, Group};
use crate::prelude::{Calibration, PipelineConfig, ProcessingStage, SurveyError, SurveyResult};
use crate::processing::aggregate::aggregate_groups;
use crate::processing::align::{align, check_counts};
use crate::processing::ingest::{ingest, LogRow, SkippedRow, ValueColumn};
use crate::processing::raster::{check_shape, count_out_of_bounds, rasterize, Grid};
use crate::processing::segment::segment;
use crate::processing::smooth::{check_sigma, smooth};
use crate::telemetry::log::LogManager;

/// Everything a single run consumes.
#[derive(Debug, Clone)]
pub struct SurveyInput {
    pub rows: Vec<LogRow>,
    pub column: ValueColumn,
    pub coordinates: Vec<Coordinate>,
    pub height: usize,
    pub width: usize,
}

/// Everything a single run produces, intermediate stages included.
#[derive(Debug, Clone)]
pub struct SurveyOutput {
    pub readings: Vec<CalibratedReading>,
    pub skipped: Vec<SkippedRow>,
    pub groups: Vec<Group>,
    pub aggregated: Vec<f64>,
    pub samples: Vec<ClassifiedSample>,
    pub grid: Grid,
    pub out_of_bounds: usize,
}

/// Batch pipeline: ingest, segment, aggregate, align, rasterize, smooth.
pub struct SurveyPipeline {
    config: Option<PipelineConfig>,
    logger: LogManager,
}

impl SurveyPipeline {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new("pipeline"),
        }
    }

    pub fn config(&self) -> Option<&PipelineConfig> {
        self.config.as_ref()
    }

    fn run(&self, config: &PipelineConfig, input: SurveyInput) -> SurveyResult<SurveyOutput> {
        check_shape(input.height, input.width)?;

        let report = ingest(input.rows, input.column, &config.calibration);
        for skipped in &report.skipped {
            self.logger
                .warn(&format!("skipping line {}: {}", skipped.line, skipped.reason));
        }

        let groups = segment(report.readings.iter().cloned());
        self.logger.record(&format!(
            "{} readings in {} groups ({} rows skipped)",
            report.readings.len(),
            groups.len(),
            report.skipped.len()
        ));
        for (i, group) in groups.iter().enumerate() {
            self.logger.detail(&format!(
                "group {} [{}] ({} points): {:?}",
                i + 1,
                group.label(),
                group.len(),
                group.values()
            ));
        }

        let aggregated = aggregate_groups(&groups)?;

        let coordinates = input.coordinates.len();
        // Opt-in pre-truncation guard; without it surplus entries are dropped.
        check_counts(coordinates, aggregated.len(), config.max_count_mismatch)?;
        if coordinates != aggregated.len() {
            self.logger.warn(&format!(
                "{} coordinates vs {} RSSI averages, truncating to {}",
                coordinates,
                aggregated.len(),
                coordinates.min(aggregated.len())
            ));
        }
        let aligned = align(&input.coordinates, &aggregated)?;

        let out_of_bounds = count_out_of_bounds(&aligned, input.height, input.width);
        if out_of_bounds > 0 {
            self.logger.warn(&format!(
                "{} samples fall outside the {}x{} floorplan",
                out_of_bounds, input.width, input.height
            ));
        }
        let raster = rasterize(&aligned, input.height, input.width);
        let grid = smooth(&raster, config.sigma)?;

        let samples = aligned
            .iter()
            .map(|sample| ClassifiedSample {
                coordinate: sample.coordinate,
                value: sample.value,
                band: ColorBand::classify(sample.value),
            })
            .collect::<Vec<_>>();
        self.logger
            .record(&format!("{} samples placed on the heatmap", samples.len()));

        Ok(SurveyOutput {
            readings: report.readings,
            skipped: report.skipped,
            groups,
            aggregated,
            samples,
            grid,
            out_of_bounds,
        })
    }
}

impl ProcessingStage for SurveyPipeline {
    type Input = SurveyInput;
    type Output = SurveyOutput;

    fn initialize(&mut self, config: &PipelineConfig) -> SurveyResult<()> {
        check_sigma(config.sigma)?;
        let Calibration { scale, offset } = config.calibration;
        if !scale.is_finite() || !offset.is_finite() {
            return Err(SurveyError::InvalidInput(format!(
                "calibration must be finite, got scale {} offset {}",
                scale, offset
            )));
        }
        self.config = Some(config.clone());
        self.logger.record(&format!(
            "initialized with sigma {} and calibration {}x{:+}",
            config.sigma, scale, offset
        ));
        Ok(())
    }

    fn execute(&mut self, input: SurveyInput) -> SurveyResult<SurveyOutput> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| SurveyError::Internal("pipeline not initialized".into()))?;
        self.run(config, input)
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}

impl Default for SurveyPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::MAX_GRID_PIXELS;

    fn pipeline(config: PipelineConfig) -> SurveyPipeline {
        let mut pipeline = SurveyPipeline::new();
        pipeline.initialize(&config).unwrap();
        pipeline
    }

    fn input(rows: Vec<LogRow>, coordinates: Vec<Coordinate>) -> SurveyInput {
        SurveyInput {
            rows,
            column: ValueColumn::Raw,
            coordinates,
            height: 40,
            width: 40,
        }
    }

    #[test]
    fn end_to_end_survey() {
        let rows = vec![
            LogRow::new(2, "t1", "P1", "-40"),
            LogRow::new(3, "t2", "P1", "-42"),
            LogRow::new(4, "t3", "P2", "-90"),
        ];
        let coordinates = vec![Coordinate::new(10, 10), Coordinate::new(20, 20)];
        let mut pipeline = pipeline(PipelineConfig {
            sigma: 2.0,
            ..Default::default()
        });

        let output = pipeline.execute(input(rows, coordinates)).unwrap();

        let calibrated: Vec<f64> = output.readings.iter().map(|r| r.calibrated_rssi).collect();
        for (got, want) in calibrated.iter().zip([-38.6, -41.74, -117.1]) {
            assert!((got - want).abs() < 1e-9);
        }
        assert_eq!(output.groups.len(), 2);
        assert_eq!(output.groups[0].len(), 2);
        assert!((output.aggregated[0] - -40.17).abs() < 1e-9);
        assert!((output.aggregated[1] - -117.1).abs() < 1e-9);

        assert_eq!(output.samples.len(), 2);
        assert_eq!(output.samples[0].coordinate, Coordinate::new(10, 10));
        assert_eq!(output.samples[0].band, ColorBand::Strong);
        assert_eq!(output.samples[1].band, ColorBand::VeryWeak);

        assert_eq!(output.grid.dim(), (40, 40));
        assert!(output.grid[[10, 10]] < 0.0);
        assert!(output.grid[[10, 11]] < 0.0);
        assert_eq!(output.out_of_bounds, 0);
    }

    #[test]
    fn malformed_rows_do_not_break_runs() {
        let rows = vec![
            LogRow::new(2, "t1", "P1", "-40"),
            LogRow::new(3, "t2", "P2", "bad"),
            LogRow::new(4, "t3", "P1", "-44"),
        ];
        let output = pipeline(PipelineConfig::default())
            .execute(input(rows, vec![Coordinate::new(1, 1)]))
            .unwrap();
        assert_eq!(output.groups.len(), 1);
        assert_eq!(output.groups[0].len(), 2);
        assert_eq!(output.skipped.len(), 1);
    }

    #[test]
    fn surplus_coordinates_are_dropped() {
        let rows = vec![LogRow::new(2, "t1", "P1", "-40")];
        let coordinates = vec![Coordinate::new(1, 1), Coordinate::new(2, 2), Coordinate::new(3, 3)];
        let output = pipeline(PipelineConfig::default())
            .execute(input(rows, coordinates))
            .unwrap();
        assert_eq!(output.samples.len(), 1);
    }

    #[test]
    fn mismatch_tolerance_aborts_run() {
        let rows = vec![LogRow::new(2, "t1", "P1", "-40")];
        let coordinates = vec![Coordinate::new(1, 1), Coordinate::new(2, 2), Coordinate::new(3, 3)];
        let mut pipeline = pipeline(PipelineConfig {
            max_count_mismatch: Some(1),
            ..Default::default()
        });
        assert!(matches!(
            pipeline.execute(input(rows, coordinates)),
            Err(SurveyError::CountMismatchExceeded { .. })
        ));
    }

    #[test]
    fn off_plan_samples_are_counted() {
        let rows = vec![LogRow::new(2, "t1", "P1", "-40"), LogRow::new(3, "t2", "P2", "-50")];
        let coordinates = vec![Coordinate::new(100, 1), Coordinate::new(2, 2)];
        let output = pipeline(PipelineConfig::default())
            .execute(input(rows, coordinates))
            .unwrap();
        assert_eq!(output.out_of_bounds, 1);
        assert_eq!(output.samples.len(), 2);
    }

    #[test]
    fn empty_floorplan_is_rejected() {
        let mut survey = input(Vec::new(), Vec::new());
        survey.width = 0;
        assert!(pipeline(PipelineConfig::default()).execute(survey).is_err());
    }

    #[test]
    fn oversized_floorplan_is_rejected() {
        let mut pipeline = pipeline(PipelineConfig::default());
        let rows = vec![LogRow::new(2, "t1", "P1", "-40")];

        let mut overflowing = input(rows.clone(), vec![Coordinate::new(1, 1)]);
        overflowing.height = usize::MAX / 2;
        overflowing.width = 4;
        assert!(matches!(
            pipeline.execute(overflowing),
            Err(SurveyError::InvalidInput(_))
        ));

        let mut too_large = input(rows, vec![Coordinate::new(1, 1)]);
        too_large.height = MAX_GRID_PIXELS / 2 + 1;
        too_large.width = 2;
        assert!(matches!(
            pipeline.execute(too_large),
            Err(SurveyError::InvalidInput(_))
        ));
    }

    #[test]
    fn execute_requires_initialization() {
        let mut pipeline = SurveyPipeline::default();
        let survey = input(vec![LogRow::new(2, "t1", "P1", "-40")], vec![Coordinate::new(1, 1)]);
        assert!(matches!(
            pipeline.execute(survey.clone()),
            Err(SurveyError::Internal(_))
        ));

        pipeline.initialize(&PipelineConfig::default()).unwrap();
        assert!(pipeline.execute(survey.clone()).is_ok());

        pipeline.cleanup();
        assert!(pipeline.config().is_none());
        assert!(matches!(
            pipeline.execute(survey),
            Err(SurveyError::Internal(_))
        ));
    }

    #[test]
    fn initialize_rejects_unusable_settings() {
        let mut pipeline = SurveyPipeline::new();
        let huge_sigma = PipelineConfig {
            sigma: 1e20,
            ..Default::default()
        };
        assert!(matches!(
            pipeline.initialize(&huge_sigma),
            Err(SurveyError::InvalidInput(_))
        ));
        let bad_calibration = PipelineConfig {
            calibration: Calibration {
                scale: f64::NAN,
                offset: 0.0,
            },
            ..Default::default()
        };
        assert!(pipeline.initialize(&bad_calibration).is_err());
        assert!(pipeline.config().is_none());
    }
}
