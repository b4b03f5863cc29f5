use anyhow::Context;
use rssicore::model::{CalibratedReading, ClassifiedSample, Coordinate, RawReading};
use rssicore::processing::Grid;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
struct RawLogRecord<'a> {
    timestamp: &'a str,
    button: &'a str,
    rssi: f64,
}

#[derive(Serialize)]
struct CalibratedLogRecord<'a> {
    timestamp: &'a str,
    button: &'a str,
    measured_rssi: f64,
    calibrated_rssi: f64,
}

#[derive(Serialize)]
struct PointRecord<'a> {
    x: i64,
    y: i64,
    rssi: f64,
    band: &'a str,
    color: &'a str,
}

fn writer(path: &Path) -> anyhow::Result<csv::Writer<fs::File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))
}

pub fn write_raw_log(path: &Path, readings: &[RawReading]) -> anyhow::Result<()> {
    let mut wtr = writer(path)?;
    for reading in readings {
        wtr.serialize(RawLogRecord {
            timestamp: &reading.timestamp,
            button: &reading.label,
            rssi: reading.rssi,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `timestamp,button,measured_rssi,calibrated_rssi`.
pub fn write_calibrated_log(path: &Path, readings: &[CalibratedReading]) -> anyhow::Result<()> {
    let mut wtr = writer(path)?;
    for reading in readings {
        wtr.serialize(CalibratedLogRecord {
            timestamp: &reading.timestamp,
            button: &reading.label,
            measured_rssi: reading.measured_rssi,
            calibrated_rssi: reading.calibrated_rssi,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_coordinates(path: &Path, coordinates: &[Coordinate]) -> anyhow::Result<()> {
    let mut wtr = writer(path)?;
    for coordinate in coordinates {
        wtr.serialize(coordinate)?;
    }
    wtr.flush()?;
    Ok(())
}

/// One CSV line per grid row, no header.
pub fn write_grid(path: &Path, grid: &Grid) -> anyhow::Result<()> {
    let mut wtr = writer(path)?;
    for row in grid.rows() {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_points(path: &Path, samples: &[ClassifiedSample]) -> anyhow::Result<()> {
    let mut wtr = writer(path)?;
    for sample in samples {
        wtr.serialize(PointRecord {
            x: sample.coordinate.x,
            y: sample.coordinate.y,
            rssi: sample.value,
            band: sample.band.label(),
            color: sample.band.color_hex(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::input::{read_coordinates, read_log};
    use rssicore::model::ColorBand;
    use rssicore::processing::ValueColumn;

    #[test]
    fn calibrated_log_can_be_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calibrated.csv");
        let readings = vec![CalibratedReading {
            timestamp: "10:00".into(),
            label: "P1".into(),
            measured_rssi: -40.0,
            calibrated_rssi: -38.6,
        }];
        write_calibrated_log(&path, &readings).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("timestamp,button,measured_rssi,calibrated_rssi\n"));
        let rows = read_log(&path, ValueColumn::Calibrated).unwrap();
        assert_eq!(rows[0].label.as_deref(), Some("P1"));
        assert_eq!(rows[0].value.as_deref(), Some("-38.6"));
    }

    #[test]
    fn coordinates_keep_x_y_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("locations.csv");
        let coords = vec![Coordinate::new(4, 9), Coordinate::new(-1, 3)];
        write_coordinates(&path, &coords).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("x,y\n"));
        assert_eq!(read_coordinates(&path).unwrap(), coords);
    }

    #[test]
    fn grid_rows_become_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.csv");
        let mut grid = Grid::zeros((2, 3));
        grid[[1, 2]] = -1.5;
        write_grid(&path, &grid).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "0,0,0\n0,0,-1.5\n");
    }

    #[test]
    fn points_carry_band_and_color() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.csv");
        let samples = vec![ClassifiedSample {
            coordinate: Coordinate::new(1, 2),
            value: -70.0,
            band: ColorBand::Good,
        }];
        write_points(&path, &samples).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "x,y,rssi,band,color\n1,2,-70.0,Good,#66CDAA\n");
    }
}
