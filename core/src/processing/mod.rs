pub mod aggregate;
pub mod align;
pub mod calibration;
pub mod ingest;
pub mod pipeline;
pub mod raster;
pub mod segment;
pub mod smooth;

pub use aggregate::{aggregate, aggregate_groups};
pub use align::{align, check_counts};
pub use calibration::calibrate;
pub use ingest::{ingest, validate_row, IngestReport, LogRow, SkipReason, SkippedRow, ValueColumn};
pub use pipeline::{SurveyInput, SurveyOutput, SurveyPipeline};
pub use raster::{check_shape, count_out_of_bounds, rasterize, Grid};
pub use segment::segment;
pub use smooth::{check_sigma, smooth};
