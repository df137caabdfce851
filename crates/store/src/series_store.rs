//! Read interface for model and observation series.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use mpa_calendar::DateRange;
use mpa_climatology::{LogicalSeriesKey, ObservationPoint, TimeSeriesPoint};

use crate::error::StoreError;
use crate::validate::{validate_ascending, validate_sample_counts};

/// Source of ordered series for the analytics engine.
///
/// Both methods return points sorted ascending by date with no duplicate
/// dates. An unknown key is not an error: it yields an empty vector, and
/// the engine reports the lack of data itself.
///
/// Implementations may block on disk or network; callers own any timeout.
pub trait SeriesStore: Send + Sync {
    /// Fetches the modelled series for `key`, optionally restricted to an
    /// inclusive date range.
    fn fetch_series(
        &self,
        key: &LogicalSeriesKey,
        range: Option<&DateRange>,
    ) -> Result<Vec<TimeSeriesPoint>, StoreError>;

    /// Fetches in-situ observations for a zone, indicator and depth.
    ///
    /// Observations are not tied to a climate model.
    fn fetch_observations(
        &self,
        zone_id: i64,
        indicator_id: i64,
        depth: Option<i32>,
        range: Option<&DateRange>,
    ) -> Result<Vec<ObservationPoint>, StoreError>;
}

impl<T: SeriesStore + ?Sized> SeriesStore for &T {
    fn fetch_series(
        &self,
        key: &LogicalSeriesKey,
        range: Option<&DateRange>,
    ) -> Result<Vec<TimeSeriesPoint>, StoreError> {
        (**self).fetch_series(key, range)
    }

    fn fetch_observations(
        &self,
        zone_id: i64,
        indicator_id: i64,
        depth: Option<i32>,
        range: Option<&DateRange>,
    ) -> Result<Vec<ObservationPoint>, StoreError> {
        (**self).fetch_observations(zone_id, indicator_id, depth, range)
    }
}

impl<T: SeriesStore + ?Sized> SeriesStore for Arc<T> {
    fn fetch_series(
        &self,
        key: &LogicalSeriesKey,
        range: Option<&DateRange>,
    ) -> Result<Vec<TimeSeriesPoint>, StoreError> {
        (**self).fetch_series(key, range)
    }

    fn fetch_observations(
        &self,
        zone_id: i64,
        indicator_id: i64,
        depth: Option<i32>,
        range: Option<&DateRange>,
    ) -> Result<Vec<ObservationPoint>, StoreError> {
        (**self).fetch_observations(zone_id, indicator_id, depth, range)
    }
}

// ---------------------------------------------------------------------------
// InMemorySeriesStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ObservationKey {
    zone_id: i64,
    indicator_id: i64,
    depth: Option<i32>,
}

/// [`SeriesStore`] backed by ordered in-process maps.
///
/// Inserts are validated once so that every fetch can slice by date without
/// re-checking order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySeriesStore {
    series: BTreeMap<LogicalSeriesKey, Vec<TimeSeriesPoint>>,
    observations: BTreeMap<ObservationKey, Vec<ObservationPoint>>,
}

impl InMemorySeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores (or replaces) the modelled series for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if dates are not strictly ascending.
    pub fn insert_series(
        &mut self,
        key: LogicalSeriesKey,
        points: Vec<TimeSeriesPoint>,
    ) -> Result<(), StoreError> {
        validate_ascending(points.iter().map(|p| p.date)).finish()?;
        tracing::debug!(%key, n_points = points.len(), "series stored");
        self.series.insert(key, points);
        Ok(())
    }

    /// Stores (or replaces) the observations for a zone, indicator and depth.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if dates are not strictly ascending
    /// or any observation has a zero sample count.
    pub fn insert_observations(
        &mut self,
        zone_id: i64,
        indicator_id: i64,
        depth: Option<i32>,
        observations: Vec<ObservationPoint>,
    ) -> Result<(), StoreError> {
        let mut c = validate_ascending(observations.iter().map(|o| o.date));
        c.extend(validate_sample_counts(&observations));
        c.finish()?;
        tracing::debug!(
            zone_id,
            indicator_id,
            ?depth,
            n_observations = observations.len(),
            "observations stored"
        );
        self.observations.insert(
            ObservationKey {
                zone_id,
                indicator_id,
                depth,
            },
            observations,
        );
        Ok(())
    }

    /// Iterates over every stored series key in key order.
    pub fn keys(&self) -> impl Iterator<Item = &LogicalSeriesKey> {
        self.series.keys()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Returns the sub-slice of date-sorted items falling within `range`.
fn slice_by_range<'a, T>(
    items: &'a [T],
    range: Option<&DateRange>,
    date: impl Fn(&T) -> NaiveDate,
) -> &'a [T] {
    match range {
        None => items,
        Some(r) => {
            let lo = items.partition_point(|x| date(x) < r.start());
            let hi = items.partition_point(|x| date(x) <= r.end());
            &items[lo..hi]
        }
    }
}

impl SeriesStore for InMemorySeriesStore {
    fn fetch_series(
        &self,
        key: &LogicalSeriesKey,
        range: Option<&DateRange>,
    ) -> Result<Vec<TimeSeriesPoint>, StoreError> {
        Ok(self
            .series
            .get(key)
            .map(|points| slice_by_range(points, range, |p| p.date).to_vec())
            .unwrap_or_default())
    }

    fn fetch_observations(
        &self,
        zone_id: i64,
        indicator_id: i64,
        depth: Option<i32>,
        range: Option<&DateRange>,
    ) -> Result<Vec<ObservationPoint>, StoreError> {
        let key = ObservationKey {
            zone_id,
            indicator_id,
            depth,
        };
        Ok(self
            .observations
            .get(&key)
            .map(|obs| slice_by_range(obs, range, |o| o.date).to_vec())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpa_climatology::TimeseriesType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key() -> LogicalSeriesKey {
        LogicalSeriesKey::new(62, 1, TimeseriesType::Bottom, 1)
    }

    fn january() -> Vec<TimeSeriesPoint> {
        (1..=31)
            .map(|d| TimeSeriesPoint::new(date(2021, 1, d), d as f64))
            .collect()
    }

    #[test]
    fn fetch_full_and_ranged() {
        let mut store = InMemorySeriesStore::new();
        store.insert_series(key(), january()).unwrap();

        assert_eq!(store.fetch_series(&key(), None).unwrap().len(), 31);

        let range = DateRange::new(date(2021, 1, 10), date(2021, 1, 12)).unwrap();
        let got = store.fetch_series(&key(), Some(&range)).unwrap();
        assert_eq!(got.len(), 3);
        assert_eq!(got[0].date, date(2021, 1, 10));
        assert_eq!(got[2].date, date(2021, 1, 12));
    }

    #[test]
    fn unknown_key_is_empty() {
        let store = InMemorySeriesStore::new();
        assert!(store.fetch_series(&key(), None).unwrap().is_empty());
        assert!(store.fetch_observations(1, 1, None, None).unwrap().is_empty());
    }

    #[test]
    fn depth_is_part_of_the_key() {
        let mut store = InMemorySeriesStore::new();
        store.insert_series(key(), january()).unwrap();
        let deep = key().with_depth(Some(40));
        assert!(store.fetch_series(&deep, None).unwrap().is_empty());
    }

    #[test]
    fn unsorted_insert_rejected() {
        let mut store = InMemorySeriesStore::new();
        let mut points = january();
        points.swap(0, 1);
        let err = store.insert_series(key(), points).unwrap_err();
        assert!(matches!(err, StoreError::Validation { count: 1, .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn observations_validated_and_sliced() {
        let mut store = InMemorySeriesStore::new();
        let bad = vec![ObservationPoint::new(date(2021, 1, 1), 5.0, 0, 0.0)];
        assert!(store.insert_observations(62, 1, None, bad).is_err());

        let obs = vec![
            ObservationPoint::new(date(2021, 1, 1), 5.0, 2, 0.1),
            ObservationPoint::new(date(2021, 3, 1), 6.0, 1, 0.0),
        ];
        store.insert_observations(62, 1, None, obs).unwrap();
        let range = DateRange::single(date(2021, 3, 1));
        let got = store.fetch_observations(62, 1, None, Some(&range)).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].value, 6.0);
    }

    #[test]
    fn arc_store_delegates() {
        let mut store = InMemorySeriesStore::new();
        store.insert_series(key(), january()).unwrap();
        let shared = Arc::new(store);
        assert_eq!(shared.fetch_series(&key(), None).unwrap().len(), 31);
        let by_ref = &*shared;
        assert_eq!(SeriesStore::fetch_series(&by_ref, &key(), None).unwrap().len(), 31);
    }
}
