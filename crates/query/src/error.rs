//! Error types for the mpa-query crate.

use mpa_calendar::CalendarError;
use mpa_climatology::ClimatologyError;
use mpa_store::StoreError;

/// Error type for all fallible operations in the mpa-query crate.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Wrapped error from the analytics engine.
    #[error(transparent)]
    Climatology(#[from] ClimatologyError),

    /// Wrapped error from the series store or anomaly sink.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Wrapped error from date handling (e.g. a reversed range).
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl QueryError {
    /// Returns `true` when the error means "this series has nothing to
    /// compute on" rather than a fault.
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            Self::Climatology(ClimatologyError::InsufficientData { .. })
        )
    }
}
