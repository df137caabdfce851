//! Inclusive date ranges and year boundaries.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CalendarError;

/// Inclusive calendar date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a new range covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range covering exactly one day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Returns the first day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns `true` if `date` lies within the range (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns the number of days covered, counting both ends.
    pub fn n_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Returns December 31 of `year`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidYear`] if the year is outside chrono's
/// representable range.
pub fn year_end(year: i32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, 12, 31).ok_or(CalendarError::InvalidYear { year })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_valid() {
        let range = DateRange::new(date(2021, 1, 1), date(2021, 12, 31)).unwrap();
        assert_eq!(range.start(), date(2021, 1, 1));
        assert_eq!(range.end(), date(2021, 12, 31));
        assert_eq!(range.n_days(), 365);
    }

    #[test]
    fn new_rejects_reversed() {
        let err = DateRange::new(date(2021, 1, 2), date(2021, 1, 1)).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidRange { .. }));
    }

    #[test]
    fn contains_is_inclusive() {
        let range = DateRange::new(date(2021, 1, 1), date(2021, 1, 3)).unwrap();
        assert!(range.contains(date(2021, 1, 1)));
        assert!(range.contains(date(2021, 1, 3)));
        assert!(!range.contains(date(2020, 12, 31)));
        assert!(!range.contains(date(2021, 1, 4)));
    }

    #[test]
    fn single_day() {
        let range = DateRange::single(date(2020, 2, 29));
        assert_eq!(range.n_days(), 1);
        assert!(range.contains(date(2020, 2, 29)));
    }

    #[test]
    fn year_end_valid() {
        assert_eq!(year_end(2022).unwrap(), date(2022, 12, 31));
    }

    #[test]
    fn year_end_out_of_range() {
        assert_eq!(
            year_end(i32::MAX).unwrap_err(),
            CalendarError::InvalidYear { year: i32::MAX }
        );
    }
}
