use anyhow::{ensure, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rssicore::model::{Coordinate, RawReading};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic walk-through survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub locations: usize,
    pub samples_per_location: usize,
    pub width: usize,
    pub height: usize,
    /// Measured RSSI right next to the access point.
    pub source_rssi: f64,
    /// Loss per pixel of distance from the access point.
    pub falloff_per_px: f64,
    pub noise: f64,
    pub seed: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            locations: 12,
            samples_per_location: 5,
            width: 640,
            height: 480,
            source_rssi: -30.0,
            falloff_per_px: 0.06,
            noise: 2.0,
            seed: 0,
        }
    }
}

/// Raw log rows plus the matching click-order coordinates.
#[derive(Debug, Clone)]
pub struct SyntheticSurvey {
    pub readings: Vec<RawReading>,
    pub coordinates: Vec<Coordinate>,
}

pub fn build_survey(config: &SynthConfig) -> anyhow::Result<SyntheticSurvey> {
    ensure!(
        config.width > 0 && config.height > 0,
        "synthetic floorplan must be non-empty"
    );
    ensure!(config.noise >= 0.0, "noise must be non-negative");
    let total = config
        .locations
        .checked_mul(config.samples_per_location)
        .context("overflow computing synthetic sample count")?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let access_point = (config.width as f64 / 2.0, config.height as f64 / 2.0);
    let mut readings = Vec::with_capacity(total);
    let mut coordinates = Vec::with_capacity(config.locations);

    for location in 0..config.locations {
        let x = rng.gen_range(0..config.width) as i64;
        let y = rng.gen_range(0..config.height) as i64;
        coordinates.push(Coordinate::new(x, y));

        let distance = (x as f64 - access_point.0).hypot(y as f64 - access_point.1);
        let expected = config.source_rssi - config.falloff_per_px * distance;
        let label = format!("P{}", location + 1);
        for sample in 0..config.samples_per_location {
            let jitter = if config.noise > 0.0 {
                rng.gen_range(-config.noise..config.noise)
            } else {
                0.0
            };
            readings.push(RawReading {
                timestamp: format!("{}", location * config.samples_per_location + sample),
                label: label.clone(),
                rssi: (expected + jitter).round(),
            });
        }
    }

    Ok(SyntheticSurvey {
        readings,
        coordinates,
    })
}
