//! Accumulated validation of series inserts.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`StoreError::Validation`], plus the ordering checks every
//! stored series must pass.

use chrono::NaiveDate;
use mpa_climatology::ObservationPoint;

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Accumulates validation errors and converts them into a single
/// [`StoreError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Merges another collector's errors into this one.
    pub(crate) fn extend(&mut self, other: ValidationCollector) {
        self.errors.extend(other.errors);
    }

    /// Returns `Ok(())` if no errors were recorded; otherwise one
    /// `Validation` error whose `details` joins every message with `"; "`.
    pub(crate) fn finish(self) -> Result<(), StoreError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Check that dates are strictly ascending (sorted, no duplicates).
pub(crate) fn validate_ascending(dates: impl IntoIterator<Item = NaiveDate>) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    let mut prev: Option<NaiveDate> = None;
    for (i, date) in dates.into_iter().enumerate() {
        if let Some(p) = prev {
            if date == p {
                c.push(format!("duplicate date {date} at index {i}"));
            } else if date < p {
                c.push(format!("date {date} at index {i} precedes {p}"));
            }
        }
        prev = Some(date);
    }
    c
}

/// Check that every observation aggregates at least one sample.
pub(crate) fn validate_sample_counts(observations: &[ObservationPoint]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    for o in observations.iter().filter(|o| o.sample_count < 1) {
        c.push(format!("observation on {} has sample_count 0", o.date));
    }
    c
}
