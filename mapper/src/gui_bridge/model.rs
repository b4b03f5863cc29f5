use rssicore::model::{ClassifiedSample, ColorBand};
use rssicore::processing::SurveyOutput;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub band: ColorBand,
    pub label: String,
    pub range: String,
    pub color: String,
}

/// Everything the renderer needs to draw a survey over its floorplan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatmapModel {
    pub width: usize,
    pub height: usize,
    pub sigma: f64,
    pub groups: usize,
    pub rows_skipped: usize,
    pub out_of_bounds: usize,
    pub points: Vec<ClassifiedSample>,
    pub legend: Vec<LegendEntry>,
    /// Smoothed grid rows; served separately from the summary.
    #[serde(skip)]
    pub grid: Vec<Vec<f64>>,
}

pub fn legend() -> Vec<LegendEntry> {
    ColorBand::ALL
        .iter()
        .map(|&band| LegendEntry {
            band,
            label: band.label().to_string(),
            range: band.legend_label().to_string(),
            color: band.color_hex().to_string(),
        })
        .collect()
}

impl HeatmapModel {
    pub fn from_output(output: &SurveyOutput, sigma: f64) -> Self {
        let (height, width) = output.grid.dim();
        Self {
            width,
            height,
            sigma,
            groups: output.groups.len(),
            rows_skipped: output.skipped.len(),
            out_of_bounds: output.out_of_bounds,
            points: output.samples.clone(),
            legend: legend(),
            grid: output.grid.rows().into_iter().map(|row| row.to_vec()).collect(),
        }
    }
}
