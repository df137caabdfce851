//! `(month, day)` bucket key over the 366-slot Gregorian year.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::error::CalendarError;

/// Day-of-year bucket identified by `(month, day)`.
///
/// Unlike an ordinal day number, the key is stable across leap and common
/// years: March 1 is always `(3, 1)`. February 29 is a bucket of its own and
/// only ever receives samples from leap years.
///
/// Ordering follows the calendar (`(1, 1) < (2, 29) < (3, 1)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayOfYear {
    month: u8,
    day: u8,
}

/// Number of days in each month of a leap year (index 0 unused).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// 0-based slot on which each month starts in the 366-slot year (index 0 unused).
pub(crate) const MONTH_START_SLOT: [u16; 13] =
    [0, 0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

impl DayOfYear {
    /// Number of distinct buckets, including February 29.
    pub const SLOTS: usize = 366;

    /// Creates a bucket key from a `(month, day)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    /// Returns [`CalendarError::InvalidDay`] if `day` is not valid for the
    /// month in a leap year (February 29 is accepted).
    pub fn new(month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let max_day = DAYS_PER_MONTH[month as usize];
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        Ok(Self { month, day })
    }

    /// Returns the bucket a calendar date falls into.
    pub fn from_date(date: NaiveDate) -> Self {
        // chrono guarantees month 1..=12 and a day valid for that month.
        Self {
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns the 0-based slot suitable for array indexing (0..=365).
    ///
    /// February 29 occupies slot 59, so March 1 is slot 60 in every year.
    pub fn index(self) -> usize {
        (MONTH_START_SLOT[self.month as usize] + self.day as u16 - 1) as usize
    }

    /// Returns `true` for the February 29 bucket.
    pub fn is_leap_day(self) -> bool {
        self.month == 2 && self.day == 29
    }
}

impl From<NaiveDate> for DayOfYear {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for DayOfYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Serialises as `"MM-DD"` so the key can be used in JSON object keys.
impl Serialize for DayOfYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_valid() {
        let doy = DayOfYear::new(6, 15).unwrap();
        assert_eq!(doy.month(), 6);
        assert_eq!(doy.day(), 15);
    }

    #[test]
    fn new_accepts_feb_29() {
        let doy = DayOfYear::new(2, 29).unwrap();
        assert!(doy.is_leap_day());
        assert_eq!(doy.index(), 59);
    }

    #[test]
    fn new_invalid_month_zero() {
        assert_eq!(
            DayOfYear::new(0, 1).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
    }

    #[test]
    fn new_invalid_month_13() {
        assert_eq!(
            DayOfYear::new(13, 1).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn new_invalid_feb_30() {
        assert_eq!(
            DayOfYear::new(2, 30).unwrap_err(),
            CalendarError::InvalidDay {
                day: 30,
                month: 2,
                max_day: 29,
            }
        );
    }

    #[test]
    fn new_invalid_day_zero() {
        assert_eq!(
            DayOfYear::new(1, 0).unwrap_err(),
            CalendarError::InvalidDay {
                day: 0,
                month: 1,
                max_day: 31,
            }
        );
    }

    #[test]
    fn from_date_matches_month_day() {
        let doy = DayOfYear::from_date(date(2021, 6, 15));
        assert_eq!(doy, DayOfYear::new(6, 15).unwrap());
    }

    #[test]
    fn same_bucket_across_leap_and_common_years() {
        let common = DayOfYear::from_date(date(2021, 3, 1));
        let leap = DayOfYear::from_date(date(2020, 3, 1));
        assert_eq!(common, leap);
        assert_eq!(common.index(), 60);
    }

    #[test]
    fn index_bounds() {
        assert_eq!(DayOfYear::new(1, 1).unwrap().index(), 0);
        assert_eq!(DayOfYear::new(12, 31).unwrap().index(), DayOfYear::SLOTS - 1);
    }

    #[test]
    fn ordering_follows_calendar() {
        let jan = DayOfYear::new(1, 31).unwrap();
        let leap = DayOfYear::new(2, 29).unwrap();
        let mar = DayOfYear::new(3, 1).unwrap();
        assert!(jan < leap);
        assert!(leap < mar);
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(DayOfYear::new(2, 9).unwrap().to_string(), "02-09");
    }

    #[test]
    fn table_integrity_month_start() {
        for m in 1..12usize {
            assert_eq!(
                MONTH_START_SLOT[m] + DAYS_PER_MONTH[m] as u16,
                MONTH_START_SLOT[m + 1],
                "MONTH_START_SLOT mismatch at month {m}"
            );
        }
        let total: u16 = DAYS_PER_MONTH[1..=12].iter().copied().map(u16::from).sum();
        assert_eq!(total as usize, DayOfYear::SLOTS);
    }
}
