use crate::model::AlignedSample;
use crate::prelude::{SurveyError, SurveyResult, MAX_GRID_PIXELS};
use ndarray::Array2;

/// Dense floorplan-sized scalar field, indexed `[[row, col]]`.
pub type Grid = Array2<f64>;

/// Rejects empty floorplans and ones larger than [`MAX_GRID_PIXELS`].
pub fn check_shape(height: usize, width: usize) -> SurveyResult<()> {
    if height == 0 || width == 0 {
        return Err(SurveyError::InvalidInput(format!(
            "floorplan must be non-empty, got {}x{}",
            width, height
        )));
    }
    match height.checked_mul(width) {
        Some(pixels) if pixels <= MAX_GRID_PIXELS => Ok(()),
        _ => Err(SurveyError::InvalidInput(format!(
            "floorplan {}x{} exceeds the maximum of {} pixels",
            width, height, MAX_GRID_PIXELS
        ))),
    }
}

/// Stamps samples onto a zeroed `(height, width)` grid.
///
/// Off-grid samples are ignored and later samples overwrite earlier ones at
/// the same pixel.
pub fn rasterize(samples: &[AlignedSample], height: usize, width: usize) -> Grid {
    let mut grid = Grid::zeros((height, width));
    for sample in samples {
        if let Some(index) = sample.coordinate.grid_index(height, width) {
            grid[index] = sample.value;
        }
    }
    grid
}

/// Number of samples `rasterize` would drop for this grid size.
pub fn count_out_of_bounds(samples: &[AlignedSample], height: usize, width: usize) -> usize {
    samples
        .iter()
        .filter(|s| s.coordinate.grid_index(height, width).is_none())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;

    fn sample(x: i64, y: i64, value: f64) -> AlignedSample {
        AlignedSample {
            coordinate: Coordinate::new(x, y),
            value,
        }
    }

    #[test]
    fn value_lands_at_row_y_column_x() {
        let grid = rasterize(&[sample(3, 4, -80.0)], 6, 5);
        assert_eq!(grid.dim(), (6, 5));
        assert_eq!(grid[[4, 3]], -80.0);
        assert_eq!(grid.iter().filter(|v| **v != 0.0).count(), 1);
    }

    #[test]
    fn last_write_wins() {
        let grid = rasterize(&[sample(3, 4, -80.0), sample(3, 4, -50.0)], 6, 5);
        assert_eq!(grid[[4, 3]], -50.0);
    }

    #[test]
    fn out_of_bounds_samples_leave_grid_untouched() {
        let samples = [
            sample(5, 0, -60.0),
            sample(0, 6, -60.0),
            sample(-1, 2, -60.0),
            sample(2, -1, -60.0),
        ];
        let grid = rasterize(&samples, 6, 5);
        assert!(grid.iter().all(|v| *v == 0.0));
        assert_eq!(count_out_of_bounds(&samples, 6, 5), 4);
    }
}
