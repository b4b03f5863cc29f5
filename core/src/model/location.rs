use crate::model::band::ColorBand;
use serde::{Deserialize, Serialize};

/// Pixel position on the floorplan; `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Row/column index into a `(height, width)` grid, if the point lies on it.
    pub fn grid_index(&self, height: usize, width: usize) -> Option<(usize, usize)> {
        let row = usize::try_from(self.y).ok()?;
        let col = usize::try_from(self.x).ok()?;
        (row < height && col < width).then_some((row, col))
    }
}

/// Aggregated value paired with the location it was measured at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedSample {
    pub coordinate: Coordinate,
    pub value: f64,
}

/// Aligned sample tagged with its display band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedSample {
    pub coordinate: Coordinate,
    pub value: f64,
    pub band: ColorBand,
}
