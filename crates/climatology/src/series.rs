//! Series identity and point types.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Measurement context of a modelled series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeseriesType {
    /// Near-bottom values (depth-averaged when the key has no depth).
    Bottom,
    /// Sea-surface values.
    Surface,
}

impl TimeseriesType {
    /// Human-readable label used in indicator names.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bottom => "Total Average Bottom",
            Self::Surface => "Surface",
        }
    }
}

impl fmt::Display for TimeseriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bottom => f.write_str("bottom"),
            Self::Surface => f.write_str("surface"),
        }
    }
}

/// Identifies one time series: zone, climate model, measurement context,
/// indicator and optional depth.
///
/// The climate model is always explicit; resolving a "currently selected"
/// model is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LogicalSeriesKey {
    zone_id: i64,
    climate_model_id: i64,
    timeseries_type: TimeseriesType,
    indicator_id: i64,
    depth: Option<i32>,
}

impl LogicalSeriesKey {
    /// Creates a depth-less key (the total-average bottom or surface series).
    pub fn new(
        zone_id: i64,
        climate_model_id: i64,
        timeseries_type: TimeseriesType,
        indicator_id: i64,
    ) -> Self {
        Self {
            zone_id,
            climate_model_id,
            timeseries_type,
            indicator_id,
            depth: None,
        }
    }

    /// Returns a copy of this key pinned to a specific depth.
    pub fn with_depth(mut self, depth: Option<i32>) -> Self {
        self.depth = depth;
        self
    }

    pub fn zone_id(&self) -> i64 {
        self.zone_id
    }

    pub fn climate_model_id(&self) -> i64 {
        self.climate_model_id
    }

    pub fn timeseries_type(&self) -> TimeseriesType {
        self.timeseries_type
    }

    pub fn indicator_id(&self) -> i64 {
        self.indicator_id
    }

    pub fn depth(&self) -> Option<i32> {
        self.depth
    }
}

impl fmt::Display for LogicalSeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "zone={} model={} type={} indicator={}",
            self.zone_id, self.climate_model_id, self.timeseries_type, self.indicator_id
        )?;
        match self.depth {
            Some(d) => write!(f, " depth={d}"),
            None => f.write_str(" depth=all"),
        }
    }
}

/// One modelled value. `value` may be NaN to mark a missing day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Returns the value when it is usable in statistics.
    pub fn finite_value(&self) -> Option<f64> {
        self.value.is_finite().then_some(self.value)
    }
}

/// One in-situ observation aggregated over `sample_count` samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObservationPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub sample_count: u32,
    pub sample_stddev: f64,
}

impl ObservationPoint {
    pub fn new(date: NaiveDate, value: f64, sample_count: u32, sample_stddev: f64) -> Self {
        Self {
            date,
            value,
            sample_count,
            sample_stddev,
        }
    }
}

/// Returns the leading run of `points` dated on or before `cutoff`.
///
/// Relies on the ascending-date ordering contract of series inputs.
pub(crate) fn up_to(points: &[TimeSeriesPoint], cutoff: NaiveDate) -> &[TimeSeriesPoint] {
    let end = points.partition_point(|p| p.date <= cutoff);
    &points[..end]
}
