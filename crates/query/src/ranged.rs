//! Result types of the date-range queries.

use chrono::NaiveDate;
use mpa_calendar::DateRange;
use mpa_climatology::{ObservationSummary, QuantileWindow};
use serde::Serialize;

/// One date of a ranged series, enriched with its day's climatology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangedRow {
    pub date: NaiveDate,
    /// Modelled value; `None` when missing.
    pub value: Option<f64>,
    pub climatology: Option<f64>,
    pub stddev: Option<f64>,
    pub observation: Option<ObservationSummary>,
}

impl RangedRow {
    /// `value - climatology`, when both are known.
    pub fn delta(&self) -> Option<f64> {
        Some(self.value? - self.climatology?)
    }
}

/// Model series over `[start, end]` joined with observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangedSeries {
    pub(crate) range: DateRange,
    pub(crate) rows: Vec<RangedRow>,
    pub(crate) rmse: Option<f64>,
}

impl RangedSeries {
    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn rows(&self) -> &[RangedRow] {
        &self.rows
    }

    /// Model/observation RMSE over the range; `None` without overlap.
    pub fn rmse(&self) -> Option<f64> {
        self.rmse
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows carrying an observation.
    pub fn n_observed(&self) -> usize {
        self.rows.iter().filter(|r| r.observation.is_some()).count()
    }
}

/// Quantile band looked up for one series date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatedBand {
    pub date: NaiveDate,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

/// Per-date quantile bands over `[start, end]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangedQuantileBand {
    pub(crate) range: DateRange,
    pub(crate) q_lower: f64,
    pub(crate) q_upper: f64,
    pub(crate) window: QuantileWindow,
    pub(crate) rows: Vec<DatedBand>,
}

impl RangedQuantileBand {
    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn q_lower(&self) -> f64 {
        self.q_lower
    }

    pub fn q_upper(&self) -> f64 {
        self.q_upper
    }

    /// Window the envelope was computed over.
    pub fn window(&self) -> QuantileWindow {
        self.window
    }

    pub fn rows(&self) -> &[DatedBand] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
