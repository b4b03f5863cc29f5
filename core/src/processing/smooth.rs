use crate::math::kernel::{correlate_axis, gaussian_kernel};
use crate::prelude::{SurveyError, SurveyResult, MAX_SIGMA};
use crate::processing::raster::Grid;
use ndarray::Axis;

/// Accepts finite deviations in `0..=MAX_SIGMA`.
pub fn check_sigma(sigma: f64) -> SurveyResult<()> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(SurveyError::InvalidInput(format!(
            "sigma must be a finite, non-negative number, got {}",
            sigma
        )));
    }
    if sigma > MAX_SIGMA {
        return Err(SurveyError::InvalidInput(format!(
            "sigma {} exceeds the maximum of {} pixels",
            sigma, MAX_SIGMA
        )));
    }
    Ok(())
}

/// Isotropic Gaussian blur over the whole grid with mirrored edges.
///
/// Applied as two 1-D passes (rows, then columns). `sigma == 0` returns
/// the grid unchanged.
pub fn smooth(grid: &Grid, sigma: f64) -> SurveyResult<Grid> {
    check_sigma(sigma)?;
    if sigma == 0.0 || grid.is_empty() {
        return Ok(grid.clone());
    }

    let weights = gaussian_kernel(sigma);
    let across_rows = correlate_axis(grid, &weights, Axis(1));
    Ok(correlate_axis(&across_rows, &weights, Axis(0)))
}
