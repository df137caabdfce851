//! Error types for the mpa-climatology crate.

/// Error type for all fallible operations in the mpa-climatology crate.
///
/// Every variant is an ordinary data condition rather than a bug: callers
/// are expected to match on the kind and turn it into a "no data" answer,
/// an absent field, or a user-facing message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClimatologyError {
    /// Returned when a computation has no qualifying input points at all
    /// (empty series, empty window, or only missing values).
    #[error("insufficient data: no finite values in {context}")]
    InsufficientData {
        /// Which input was found empty.
        context: &'static str,
    },

    /// Returned when a day-of-year bucket required by the computation has
    /// no climatology entry.
    #[error("no climatology entry for day {month:02}-{day:02}")]
    MissingClimatologyBucket {
        /// Month of the missing bucket.
        month: u8,
        /// Day of the missing bucket.
        day: u8,
    },

    /// Returned when fewer years are available than the baseline requires.
    #[error("insufficient baseline: got {available} years, need {required}")]
    InsufficientBaseline {
        /// Number of years with data.
        available: usize,
        /// Number of years the baseline needs.
        required: usize,
    },

    /// Returned when the baseline standard deviation is zero or not finite,
    /// which would make every standardized anomaly infinite or NaN.
    #[error("degenerate baseline: standard deviation of {n_years} baseline years is zero")]
    DegenerateBaseline {
        /// Number of years in the baseline.
        n_years: usize,
    },

    /// Returned when a quantile argument is outside `[0, 1]` or NaN.
    #[error("invalid quantile: {q} (must be within 0..=1)")]
    InvalidQuantile {
        /// The rejected quantile.
        q: f64,
    },

    /// Returned when the baseline year count cannot yield a sample deviation.
    #[error("invalid baseline year count: {count} (must be at least 2)")]
    InvalidBaselineYearCount {
        /// The rejected count.
        count: usize,
    },
}

impl ClimatologyError {
    /// Builds a [`ClimatologyError::MissingClimatologyBucket`] for a bucket key.
    pub fn missing_bucket(doy: mpa_calendar::DayOfYear) -> Self {
        Self::MissingClimatologyBucket {
            month: doy.month(),
            day: doy.day(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_insufficient_data() {
        let e = ClimatologyError::InsufficientData {
            context: "baseline window",
        };
        assert_eq!(
            e.to_string(),
            "insufficient data: no finite values in baseline window"
        );
    }

    #[test]
    fn display_missing_bucket() {
        let e = ClimatologyError::MissingClimatologyBucket { month: 2, day: 29 };
        assert_eq!(e.to_string(), "no climatology entry for day 02-29");
    }

    #[test]
    fn display_insufficient_baseline() {
        let e = ClimatologyError::InsufficientBaseline {
            available: 12,
            required: 30,
        };
        assert_eq!(
            e.to_string(),
            "insufficient baseline: got 12 years, need 30"
        );
    }

    #[test]
    fn display_degenerate_baseline() {
        let e = ClimatologyError::DegenerateBaseline { n_years: 30 };
        assert_eq!(
            e.to_string(),
            "degenerate baseline: standard deviation of 30 baseline years is zero"
        );
    }

    #[test]
    fn display_invalid_quantile() {
        let e = ClimatologyError::InvalidQuantile { q: 1.5 };
        assert_eq!(e.to_string(), "invalid quantile: 1.5 (must be within 0..=1)");
    }

    #[test]
    fn missing_bucket_from_key() {
        let doy = mpa_calendar::DayOfYear::new(2, 29).unwrap();
        assert_eq!(
            ClimatologyError::missing_bucket(doy),
            ClimatologyError::MissingClimatologyBucket { month: 2, day: 29 }
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ClimatologyError>();
    }
}
