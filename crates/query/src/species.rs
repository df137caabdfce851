//! Species thermal tolerance ranges.

use serde::Serialize;

use crate::error::QueryError;
use crate::ranged::RangedSeries;

/// Temperature range a species tolerates, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThermalRange {
    lower: f64,
    upper: f64,
}

/// Where a value sits relative to a [`ThermalRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalStatus {
    Below,
    Within,
    Above,
}

/// Day counts of a ranged series per [`ThermalStatus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThermalExposure {
    pub below: usize,
    pub within: usize,
    pub above: usize,
    /// Days without a modelled value.
    pub missing: usize,
}

impl ThermalExposure {
    /// Number of days with a modelled value.
    pub fn n_classified(&self) -> usize {
        self.below + self.within + self.above
    }
}

impl ThermalRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidConfig`] if either bound is not finite
    /// or `lower > upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, QueryError> {
        if !(lower.is_finite() && upper.is_finite()) || lower > upper {
            return Err(QueryError::InvalidConfig {
                reason: format!("thermal range must satisfy finite lower <= upper, got [{lower}, {upper}]"),
            });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Classifies one value; `None` for missing (non-finite) values.
    pub fn classify(&self, value: f64) -> Option<ThermalStatus> {
        if !value.is_finite() {
            None
        } else if value < self.lower {
            Some(ThermalStatus::Below)
        } else if value > self.upper {
            Some(ThermalStatus::Above)
        } else {
            Some(ThermalStatus::Within)
        }
    }

    /// Counts the days of `series` below, within and above the range.
    pub fn exposure(&self, series: &RangedSeries) -> ThermalExposure {
        series
            .rows()
            .iter()
            .fold(ThermalExposure::default(), |mut acc, row| {
                match row.value.and_then(|v| self.classify(v)) {
                    Some(ThermalStatus::Below) => acc.below += 1,
                    Some(ThermalStatus::Within) => acc.within += 1,
                    Some(ThermalStatus::Above) => acc.above += 1,
                    None => acc.missing += 1,
                }
                acc
            })
    }
}
