//! Annual means and standardized anomalies.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::ClimatologyError;
use crate::series::TimeSeriesPoint;

/// Number of leading years forming the anomaly baseline.
pub const DEFAULT_BASELINE_YEAR_COUNT: usize = 30;

/// What to do when fewer years exist than the baseline asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselinePolicy {
    /// Fail with [`ClimatologyError::InsufficientBaseline`].
    #[default]
    Strict,
    /// Use every available year as the baseline (at least two).
    UseAvailable,
}

/// Mean of one calendar year's finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualMean {
    pub year: i32,
    pub mean: f64,
    pub n_values: usize,
}

/// Standardized anomaly of one calendar year, in baseline standard deviations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualAnomaly {
    pub year: i32,
    pub anomaly: f64,
}

/// Standardized anomalies for every year of a series, ascending by year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualAnomalySeries {
    rows: Vec<AnnualAnomaly>,
    baseline_mean: f64,
    baseline_std: f64,
    baseline_years: (i32, i32),
}

impl AnnualAnomalySeries {
    pub fn rows(&self) -> &[AnnualAnomaly] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mean of the baseline years' annual means.
    pub fn baseline_mean(&self) -> f64 {
        self.baseline_mean
    }

    /// Sample standard deviation of the baseline years' annual means.
    pub fn baseline_std(&self) -> f64 {
        self.baseline_std
    }

    /// First and last year of the baseline (inclusive).
    pub fn baseline_years(&self) -> (i32, i32) {
        self.baseline_years
    }

    /// Anomaly for a given year, if present.
    pub fn get(&self, year: i32) -> Option<f64> {
        self.rows
            .binary_search_by_key(&year, |r| r.year)
            .ok()
            .map(|i| self.rows[i].anomaly)
    }
}

/// Averages the finite values of each calendar year.
///
/// A year appears only if it holds at least one finite value.
pub fn annual_means(points: &[TimeSeriesPoint]) -> Vec<AnnualMean> {
    let mut by_year: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for p in points {
        if let Some(v) = p.finite_value() {
            let acc = by_year.entry(p.date.year()).or_insert((0.0, 0));
            acc.0 += v;
            acc.1 += 1;
        }
    }
    by_year
        .into_iter()
        .map(|(year, (sum, n))| AnnualMean {
            year,
            mean: sum / n as f64,
            n_values: n,
        })
        .collect()
}

/// Computes the standardized anomaly of every year of a series.
///
/// The baseline is the first `baseline_year_count` years present, in
/// ascending order; it is never restricted by date. For each year,
/// `anomaly = (annual_mean - baseline_mean) / baseline_std`.
///
/// # Errors
///
/// Returns [`ClimatologyError::InvalidBaselineYearCount`] if
/// `baseline_year_count < 2`.
/// Returns [`ClimatologyError::InsufficientData`] if no year holds a finite
/// value.
/// Returns [`ClimatologyError::InsufficientBaseline`] if fewer years than
/// required exist (under [`BaselinePolicy::Strict`]) or fewer than two
/// (under [`BaselinePolicy::UseAvailable`]).
/// Returns [`ClimatologyError::DegenerateBaseline`] if the baseline
/// standard deviation is zero.
pub fn compute_annual_anomalies(
    points: &[TimeSeriesPoint],
    baseline_year_count: usize,
    policy: BaselinePolicy,
) -> Result<AnnualAnomalySeries, ClimatologyError> {
    if baseline_year_count < 2 {
        return Err(ClimatologyError::InvalidBaselineYearCount {
            count: baseline_year_count,
        });
    }

    let means = annual_means(points);
    if means.is_empty() {
        return Err(ClimatologyError::InsufficientData { context: "series" });
    }

    let n_baseline = match policy {
        BaselinePolicy::Strict if means.len() < baseline_year_count => {
            return Err(ClimatologyError::InsufficientBaseline {
                available: means.len(),
                required: baseline_year_count,
            });
        }
        BaselinePolicy::UseAvailable if means.len() < 2 => {
            return Err(ClimatologyError::InsufficientBaseline {
                available: means.len(),
                required: 2,
            });
        }
        _ => means.len().min(baseline_year_count),
    };
    if n_baseline < baseline_year_count {
        tracing::warn!(
            available = n_baseline,
            requested = baseline_year_count,
            "anomaly baseline shortened to the available years"
        );
    }

    let baseline: Vec<f64> = means[..n_baseline].iter().map(|m| m.mean).collect();
    let baseline_mean = mpa_stats::mean(&baseline);
    let baseline_std = mpa_stats::sd(&baseline);
    if !(baseline_std.is_finite() && baseline_std > 0.0) {
        return Err(ClimatologyError::DegenerateBaseline {
            n_years: n_baseline,
        });
    }

    let rows: Vec<AnnualAnomaly> = means
        .iter()
        .map(|m| AnnualAnomaly {
            year: m.year,
            anomaly: (m.mean - baseline_mean) / baseline_std,
        })
        .collect();

    tracing::debug!(
        n_years = rows.len(),
        n_baseline,
        baseline_mean,
        baseline_std,
        "annual anomalies computed"
    );

    Ok(AnnualAnomalySeries {
        rows,
        baseline_mean,
        baseline_std,
        baseline_years: (means[0].year, means[n_baseline - 1].year),
    })
}
