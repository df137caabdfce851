//! CSV readers for model series and observation files.
//!
//! Model series: `date,value`. Observations: `date,value,count,std`.
//! Dates are ISO `YYYY-MM-DD`. A blank value or `nan` reads as a missing
//! (NaN) value; the row keeps its date.

use std::path::Path;

use chrono::NaiveDate;
use csv::{Position, ReaderBuilder, StringRecord, Trim};
use mpa_climatology::{ObservationPoint, TimeSeriesPoint};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::StoreError;
use crate::validate::{validate_ascending, validate_sample_counts};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
struct SeriesRecord {
    date: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct ObservationRecord {
    date: String,
    value: String,
    count: String,
    std: String,
}

/// Reads a `date,value` model series.
///
/// # Errors
///
/// Returns [`StoreError::FileNotFound`] if `path` does not exist,
/// [`StoreError::Csv`] / [`StoreError::Parse`] on malformed content, and
/// [`StoreError::Validation`] if dates are not strictly ascending.
pub fn read_series_csv(path: &Path) -> Result<Vec<TimeSeriesPoint>, StoreError> {
    let mut rdr = open(path)?;
    let headers = rdr.headers().map_err(|e| csv_error(path, e))?.clone();
    let mut points = Vec::new();
    for row in rdr.records() {
        let (line, rec) = deserialize_row::<SeriesRecord>(path, &headers, row)?;
        points.push(TimeSeriesPoint::new(
            parse_date(path, line, &rec.date)?,
            parse_value(path, line, "value", &rec.value)?,
        ));
    }
    validate_ascending(points.iter().map(|p| p.date)).finish()?;
    debug!(path = %path.display(), n_points = points.len(), "series csv read");
    Ok(points)
}

/// Reads a `date,value,count,std` observation file.
///
/// A blank `std` reads as NaN; `count` is required.
///
/// # Errors
///
/// As [`read_series_csv`]; validation additionally rejects `count = 0`.
pub fn read_observations_csv(path: &Path) -> Result<Vec<ObservationPoint>, StoreError> {
    let mut rdr = open(path)?;
    let headers = rdr.headers().map_err(|e| csv_error(path, e))?.clone();
    let mut observations = Vec::new();
    for row in rdr.records() {
        let (line, rec) = deserialize_row::<ObservationRecord>(path, &headers, row)?;
        let count = rec.count.parse::<u32>().map_err(|_| StoreError::Parse {
            path: path.to_path_buf(),
            line,
            column: "count",
            raw: rec.count.clone(),
        })?;
        observations.push(ObservationPoint::new(
            parse_date(path, line, &rec.date)?,
            parse_value(path, line, "value", &rec.value)?,
            count,
            parse_value(path, line, "std", &rec.std)?,
        ));
    }
    let mut c = validate_ascending(observations.iter().map(|o| o.date));
    c.extend(validate_sample_counts(&observations));
    c.finish()?;
    debug!(
        path = %path.display(),
        n_observations = observations.len(),
        "observation csv read"
    );
    Ok(observations)
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>, StoreError> {
    if !path.exists() {
        return Err(StoreError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))
}

/// Decodes one record together with the file line it starts on.
fn deserialize_row<T: DeserializeOwned>(
    path: &Path,
    headers: &StringRecord,
    row: csv::Result<StringRecord>,
) -> Result<(u64, T), StoreError> {
    let record = row.map_err(|e| csv_error(path, e))?;
    let line = record.position().map_or(0, Position::line);
    let rec = record
        .deserialize(Some(headers))
        .map_err(|e| csv_error(path, e))?;
    Ok((line, rec))
}

fn csv_error(path: &Path, e: csv::Error) -> StoreError {
    StoreError::Csv {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

fn parse_date(path: &Path, line: u64, raw: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| StoreError::Parse {
        path: path.to_path_buf(),
        line,
        column: "date",
        raw: raw.to_string(),
    })
}

fn parse_value(path: &Path, line: u64, column: &'static str, raw: &str) -> Result<f64, StoreError> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>().map_err(|_| StoreError::Parse {
        path: path.to_path_buf(),
        line,
        column,
        raw: raw.to_string(),
    })
}
