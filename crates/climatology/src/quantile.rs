//! Lower/upper quantile envelopes per day-of-year.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use mpa_calendar::DayOfYear;
use serde::{Deserialize, Serialize};

use crate::error::ClimatologyError;
use crate::grouping::{check_quantile, group_by_day_of_year};
use crate::series::{TimeSeriesPoint, up_to};

/// Which part of a series feeds a quantile envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantileWindow {
    /// Every point of the series.
    #[default]
    Full,
    /// Only points dated on or before the baseline cutoff.
    BaselineOnly,
}

/// Lower and upper quantile of one day-of-year bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantileBand {
    pub lower: f64,
    pub upper: f64,
}

/// Mapping from day-of-year bucket to its `(q_lower, q_upper)` band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantileEnvelope {
    q_lower: f64,
    q_upper: f64,
    window: QuantileWindow,
    bands: BTreeMap<DayOfYear, QuantileBand>,
}

impl QuantileEnvelope {
    /// Returns the band for a bucket, if the window had data for it.
    pub fn get(&self, doy: DayOfYear) -> Option<&QuantileBand> {
        self.bands.get(&doy)
    }

    /// Returns the band for the bucket `date` falls into.
    pub fn at(&self, date: NaiveDate) -> Option<&QuantileBand> {
        self.get(DayOfYear::from_date(date))
    }

    /// Iterates over the bands in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (DayOfYear, &QuantileBand)> {
        self.bands.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn q_lower(&self) -> f64 {
        self.q_lower
    }

    pub fn q_upper(&self) -> f64 {
        self.q_upper
    }

    pub fn window(&self) -> QuantileWindow {
        self.window
    }
}

/// Computes the per-bucket `q_lower` / `q_upper` quantiles of a series.
///
/// `baseline_cutoff` is only consulted for [`QuantileWindow::BaselineOnly`].
/// The two quantiles are independent: `q_lower >= q_upper` is logged but
/// still evaluated.
///
/// # Errors
///
/// Returns [`ClimatologyError::InvalidQuantile`] if either quantile is
/// outside `[0, 1]`.
/// Returns [`ClimatologyError::InsufficientData`] if the window contains no
/// finite value.
pub fn compute_quantile_band(
    points: &[TimeSeriesPoint],
    q_lower: f64,
    q_upper: f64,
    window: QuantileWindow,
    baseline_cutoff: NaiveDate,
) -> Result<QuantileEnvelope, ClimatologyError> {
    check_quantile(q_lower)?;
    check_quantile(q_upper)?;
    if q_lower >= q_upper {
        tracing::warn!(q_lower, q_upper, "quantile band requested with q_lower >= q_upper");
    }

    let windowed = match window {
        QuantileWindow::Full => points,
        QuantileWindow::BaselineOnly => up_to(points, baseline_cutoff),
    };
    let groups = group_by_day_of_year(windowed);
    if groups.is_empty() {
        return Err(ClimatologyError::InsufficientData {
            context: "quantile window",
        });
    }

    let bands: BTreeMap<DayOfYear, QuantileBand> = groups
        .into_iter()
        .map(|(doy, sorted)| {
            let band = QuantileBand {
                lower: mpa_stats::quantile_type7(&sorted, q_lower),
                upper: mpa_stats::quantile_type7(&sorted, q_upper),
            };
            (doy, band)
        })
        .collect();

    tracing::debug!(
        n_points = windowed.len(),
        n_buckets = bands.len(),
        ?window,
        "quantile envelope computed"
    );

    Ok(QuantileEnvelope {
        q_lower,
        q_upper,
        window,
        bands,
    })
}
