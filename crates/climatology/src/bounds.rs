//! Deviation of the series extremes from climatology.

use chrono::NaiveDate;
use mpa_calendar::DayOfYear;
use serde::Serialize;

use crate::error::ClimatologyError;
use crate::profile::ClimatologyProfile;
use crate::series::TimeSeriesPoint;

/// Normalisation range for delta displays: the deviation *at* the global
/// maximum and minimum values of a series.
///
/// This is one scalar pair per series, not a per-date structure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeviationBounds {
    /// `max.value - climatology(max.date)`.
    pub max_delta: f64,
    /// `min.value - climatology(min.date)`.
    pub min_delta: f64,
    /// Date of the global maximum (first one on ties).
    pub max_date: NaiveDate,
    /// Date of the global minimum (first one on ties).
    pub min_date: NaiveDate,
}

/// Computes the deviation of the series' extreme values from the
/// climatology of their day-of-year buckets.
///
/// Missing values are skipped. On ties the earliest point wins.
///
/// # Errors
///
/// Returns [`ClimatologyError::InsufficientData`] if the series has no
/// finite value.
/// Returns [`ClimatologyError::MissingClimatologyBucket`] if the bucket of
/// either extreme has no climatology entry.
pub fn compute_deviation_bounds(
    points: &[TimeSeriesPoint],
    climatology: &ClimatologyProfile,
) -> Result<DeviationBounds, ClimatologyError> {
    let mut finite = points.iter().filter(|p| p.value.is_finite());
    let first = finite.next().ok_or(ClimatologyError::InsufficientData {
        context: "series",
    })?;

    let (max, min) = finite.fold((first, first), |(max, min), p| {
        (
            if p.value > max.value { p } else { max },
            if p.value < min.value { p } else { min },
        )
    });

    let max_clim = climatology.lookup(DayOfYear::from_date(max.date))?.central;
    let min_clim = climatology.lookup(DayOfYear::from_date(min.date))?.central;

    Ok(DeviationBounds {
        max_delta: max.value - max_clim,
        min_delta: min.value - min_clim,
        max_date: max.date,
        min_date: min.date,
    })
}
