use anyhow::{bail, Context};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::warn;
use rssicore::model::Coordinate;
use rssicore::processing::{LogRow, ValueColumn};
use std::io::Read;
use std::path::Path;

const LABEL_HEADERS: [&str; 2] = ["label", "button"];

fn column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|name| h.eq_ignore_ascii_case(name)))
}

fn field(record: &StringRecord, index: Option<usize>) -> Option<String> {
    index.and_then(|i| record.get(i)).map(str::to_string)
}

/// Reads a survey log. Rows are returned unvalidated; missing columns leave
/// the matching field empty so the row is reported during ingest.
pub fn read_log_from<R: Read>(reader: R, column_kind: ValueColumn) -> anyhow::Result<Vec<LogRow>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = reader.headers().context("reading log header")?.clone();

    let timestamp = column(&headers, &["timestamp"]);
    let label = column(&headers, &LABEL_HEADERS);
    let value = column(&headers, &[column_kind.header()]);
    if label.is_none() {
        warn!("log has no label/button column; every row will be skipped");
    }
    if value.is_none() {
        warn!(
            "log has no {} column; every row will be skipped",
            column_kind.header()
        );
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading log row {}", index + 2))?;
        rows.push(LogRow {
            line: index + 2,
            timestamp: field(&record, timestamp),
            label: field(&record, label),
            value: field(&record, value),
        });
    }
    Ok(rows)
}

pub fn read_log<P: AsRef<Path>>(path: P, column_kind: ValueColumn) -> anyhow::Result<Vec<LogRow>> {
    let path_ref = path.as_ref();
    let file = std::fs::File::open(path_ref)
        .with_context(|| format!("opening RSSI log {}", path_ref.display()))?;
    read_log_from(file, column_kind).with_context(|| format!("parsing RSSI log {}", path_ref.display()))
}

/// Reads `x,y` pixel coordinates in file order. Any malformed row is fatal.
pub fn read_coordinates_from<R: Read>(reader: R) -> anyhow::Result<Vec<Coordinate>> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = reader.headers().context("reading coordinate header")?.clone();
    let (Some(x), Some(y)) = (column(&headers, &["x"]), column(&headers, &["y"])) else {
        bail!("coordinate file needs `x` and `y` columns");
    };

    let mut coordinates = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let line = index + 2;
        let record = record.with_context(|| format!("reading coordinate row {}", line))?;
        let parse = |i: usize, name: &str| -> anyhow::Result<i64> {
            let text = record.get(i).unwrap_or_default();
            text.parse::<i64>()
                .with_context(|| format!("line {}: invalid {} value {:?}", line, name, text))
        };
        coordinates.push(Coordinate::new(parse(x, "x")?, parse(y, "y")?));
    }
    Ok(coordinates)
}

pub fn read_coordinates<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Coordinate>> {
    let path_ref = path.as_ref();
    let file = std::fs::File::open(path_ref)
        .with_context(|| format!("opening coordinates {}", path_ref.display()))?;
    read_coordinates_from(file)
        .with_context(|| format!("parsing coordinates {}", path_ref.display()))
}
