//! Day-of-year climatological baseline.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use mpa_calendar::DayOfYear;
use serde::Serialize;

use crate::error::ClimatologyError;
use crate::grouping::{check_quantile, group_by_day_of_year};
use crate::series::{TimeSeriesPoint, up_to};

/// Central quantile treated as "climatology" (the empirical median).
pub const DEFAULT_CENTRAL_QUANTILE: f64 = 0.5;

/// Baseline statistics for one day-of-year bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClimatologyEntry {
    /// Central quantile of the bucket's baseline values.
    pub central: f64,
    /// Sample standard deviation (N-1); `None` for single-sample buckets.
    pub stddev: Option<f64>,
    /// Number of finite baseline values in the bucket.
    pub n_samples: usize,
}

/// Mapping from day-of-year bucket to baseline statistics, derived once per
/// series and baseline window.
///
/// A bucket with no finite baseline values is absent; look-ups must handle
/// `None` (see [`ClimatologyProfile::lookup`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimatologyProfile {
    baseline_cutoff: NaiveDate,
    central_quantile: f64,
    entries: BTreeMap<DayOfYear, ClimatologyEntry>,
}

impl ClimatologyProfile {
    /// Returns the entry for a bucket, if the baseline had data for it.
    pub fn get(&self, doy: DayOfYear) -> Option<&ClimatologyEntry> {
        self.entries.get(&doy)
    }

    /// Returns the entry for the bucket `date` falls into.
    pub fn at(&self, date: NaiveDate) -> Option<&ClimatologyEntry> {
        self.get(DayOfYear::from_date(date))
    }

    /// Returns the entry for a bucket, or a
    /// [`ClimatologyError::MissingClimatologyBucket`] error.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::MissingClimatologyBucket`] if the bucket
    /// has no baseline data.
    pub fn lookup(&self, doy: DayOfYear) -> Result<&ClimatologyEntry, ClimatologyError> {
        self.get(doy)
            .ok_or_else(|| ClimatologyError::missing_bucket(doy))
    }

    /// Iterates over the buckets in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (DayOfYear, &ClimatologyEntry)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Returns the number of buckets with baseline data.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no bucket has baseline data.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last date included in the baseline.
    pub fn baseline_cutoff(&self) -> NaiveDate {
        self.baseline_cutoff
    }

    /// Quantile used for [`ClimatologyEntry::central`].
    pub fn central_quantile(&self) -> f64 {
        self.central_quantile
    }
}

/// Computes the day-of-year baseline of a series.
///
/// Only points dated on or before `baseline_cutoff` contribute. For each
/// bucket, `central` is the `central_quantile` of the finite values
/// (linear interpolation between order statistics) and `stddev` their
/// sample standard deviation.
///
/// # Errors
///
/// Returns [`ClimatologyError::InvalidQuantile`] if `central_quantile` is
/// outside `[0, 1]`.
/// Returns [`ClimatologyError::InsufficientData`] if no finite value lies in
/// the baseline window.
pub fn compute_climatology(
    points: &[TimeSeriesPoint],
    baseline_cutoff: NaiveDate,
    central_quantile: f64,
) -> Result<ClimatologyProfile, ClimatologyError> {
    check_quantile(central_quantile)?;

    let baseline = up_to(points, baseline_cutoff);
    let groups = group_by_day_of_year(baseline);
    if groups.is_empty() {
        return Err(ClimatologyError::InsufficientData {
            context: "baseline window",
        });
    }

    let entries: BTreeMap<DayOfYear, ClimatologyEntry> = groups
        .into_iter()
        .map(|(doy, sorted)| {
            let entry = ClimatologyEntry {
                central: mpa_stats::quantile_type7(&sorted, central_quantile),
                stddev: mpa_stats::sample_sd(&sorted),
                n_samples: sorted.len(),
            };
            (doy, entry)
        })
        .collect();

    tracing::debug!(
        n_points = baseline.len(),
        n_buckets = entries.len(),
        %baseline_cutoff,
        "climatology computed"
    );

    Ok(ClimatologyProfile {
        baseline_cutoff,
        central_quantile,
        entries,
    })
}
