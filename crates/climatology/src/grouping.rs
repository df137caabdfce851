//! Day-of-year grouping shared by the climatology and quantile calculators.

use std::collections::BTreeMap;

use mpa_calendar::DayOfYear;

use crate::error::ClimatologyError;
use crate::series::TimeSeriesPoint;

/// Groups the finite values of `points` by day-of-year bucket.
///
/// Each bucket's values are sorted ascending, ready for quantile lookup.
/// Buckets whose points are all missing do not appear in the result.
pub(crate) fn group_by_day_of_year(points: &[TimeSeriesPoint]) -> BTreeMap<DayOfYear, Vec<f64>> {
    let mut raw: BTreeMap<DayOfYear, Vec<f64>> = BTreeMap::new();
    for p in points {
        raw.entry(DayOfYear::from_date(p.date)).or_default().push(p.value);
    }
    raw.into_iter()
        .map(|(doy, values)| (doy, mpa_stats::finite_sorted(&values)))
        .filter(|(_, values)| !values.is_empty())
        .collect()
}

/// Checks that `q` is a usable quantile argument.
pub(crate) fn check_quantile(q: f64) -> Result<(), ClimatologyError> {
    if (0.0..=1.0).contains(&q) {
        Ok(())
    } else {
        Err(ClimatologyError::InvalidQuantile { q })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(y: i32, m: u32, d: u32, v: f64) -> TimeSeriesPoint {
        TimeSeriesPoint::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), v)
    }

    #[test]
    fn groups_across_years_and_sorts() {
        let points = [
            point(2019, 6, 15, 14.0),
            point(2020, 6, 15, 10.0),
            point(2021, 6, 15, 12.0),
            point(2021, 6, 16, 1.0),
        ];
        let groups = group_by_day_of_year(&points);
        assert_eq!(groups.len(), 2);
        let jun15 = DayOfYear::new(6, 15).unwrap();
        assert_eq!(groups[&jun15], vec![10.0, 12.0, 14.0]);
    }

    #[test]
    fn all_nan_bucket_is_absent() {
        let points = [point(2020, 1, 1, f64::NAN), point(2020, 1, 2, 3.0)];
        let groups = group_by_day_of_year(&points);
        assert_eq!(groups.len(), 1);
        assert!(!groups.contains_key(&DayOfYear::new(1, 1).unwrap()));
    }

    #[test]
    fn quantile_bounds() {
        assert!(check_quantile(0.0).is_ok());
        assert!(check_quantile(1.0).is_ok());
        assert!(check_quantile(-0.1).is_err());
        assert!(check_quantile(1.1).is_err());
        assert!(check_quantile(f64::NAN).is_err());
    }
}
