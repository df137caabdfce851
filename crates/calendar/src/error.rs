//! Error types for the mpa-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the mpa-calendar crate.
///
/// Covers validation failures for `(month, day)` bucket keys, date ranges
/// and year boundaries of the Gregorian calendar.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day number exceeds the number of days in the given month.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The invalid day number that was provided.
        day: u8,
        /// The month for which the day is invalid.
        month: u8,
        /// The maximum valid day for the given month.
        max_day: u8,
    },

    /// Returned when a range starts after it ends.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// First day of the rejected range.
        start: NaiveDate,
        /// Last day of the rejected range.
        end: NaiveDate,
    },

    /// Returned when a year cannot be represented as a calendar date.
    #[error("year {year} is out of the supported date range")]
    InvalidYear {
        /// The unrepresentable year.
        year: i32,
    },
}
