//! The four read operations external callers invoke.

use chrono::NaiveDate;
use mpa_calendar::DateRange;
use mpa_climatology::{
    AnnualAnomalySeries, ClimatologyError, LogicalSeriesKey, ObservationSummary, TimeSeriesPoint,
    compute_annual_anomalies, compute_climatology, compute_deviation_bounds,
    compute_quantile_band, compute_rmse, join,
};
use mpa_store::SeriesStore;
use tracing::debug;

use crate::config::QueryConfig;
use crate::error::QueryError;
use crate::ranged::{DatedBand, RangedQuantileBand, RangedRow, RangedSeries};
use crate::snapshot::DateSnapshot;

/// Composes store reads and the analytics engine into query results.
///
/// Stateless between calls: every operation fetches what it needs and
/// derives everything on demand, so one facade can serve concurrent
/// queries for different keys.
#[derive(Debug, Clone)]
pub struct QueryFacade<S> {
    store: S,
    config: QueryConfig,
}

impl<S: SeriesStore> QueryFacade<S> {
    /// Creates a facade over `store`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidConfig`] if `config` fails validation.
    pub fn new(store: S, config: QueryConfig) -> Result<Self, QueryError> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Everything shown for one date of one series.
    ///
    /// The quantile band uses the configured snapshot window. Figures that
    /// cannot be derived for this date are `None` rather than errors; in
    /// particular an extreme falling in a bucket without climatology drops
    /// the deltas only.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Climatology`] when the series has no finite
    /// value at all or a quantile is out of range, and [`QueryError::Store`]
    /// on read failures. A series without baseline data still yields its
    /// value and observation.
    #[tracing::instrument(skip(self, key), fields(key = %key))]
    pub fn selected_date_snapshot(
        &self,
        key: &LogicalSeriesKey,
        date: NaiveDate,
        q_lower: f64,
        q_upper: f64,
    ) -> Result<DateSnapshot, QueryError> {
        let cutoff = self.config.baseline_cutoff();
        let points = self.store.fetch_series(key, None)?;

        let profile = unless_window_empty(
            &points,
            compute_climatology(&points, cutoff, self.config.central_quantile()),
        )?;
        let envelope = unless_window_empty(
            &points,
            compute_quantile_band(
                &points,
                q_lower,
                q_upper,
                self.config.snapshot_window(),
                cutoff,
            ),
        )?;
        let bounds = match profile.as_ref().map(|p| compute_deviation_bounds(&points, p)) {
            None => None,
            Some(Ok(b)) => Some(b),
            Some(Err(ClimatologyError::MissingClimatologyBucket { month, day })) => {
                debug!(month, day, "series extreme has no climatology bucket");
                None
            }
            Some(Err(e)) => return Err(e.into()),
        };

        let value = point_on(&points, date).and_then(TimeSeriesPoint::finite_value);
        let observation = self
            .store
            .fetch_observations(
                key.zone_id(),
                key.indicator_id(),
                key.depth(),
                Some(&DateRange::single(date)),
            )?
            .first()
            .map(ObservationSummary::from);

        let entry = profile.as_ref().and_then(|p| p.at(date));
        let band = envelope.as_ref().and_then(|e| e.at(date));

        Ok(DateSnapshot {
            date,
            value,
            climatology: entry.map(|e| e.central),
            stddev: entry.and_then(|e| e.stddev),
            observation,
            lower_quantile: band.map(|b| b.lower),
            upper_quantile: band.map(|b| b.upper),
            min_delta: bounds.map(|b| b.min_delta),
            max_delta: bounds.map(|b| b.max_delta),
        })
    }

    /// Model series over `[start, end]` with per-row climatology and
    /// observations, plus the RMSE over the range.
    ///
    /// The climatology always comes from the full series' baseline window,
    /// independent of the requested range.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Calendar`] if `start > end`,
    /// [`QueryError::Climatology`] if the series has no finite value, and
    /// [`QueryError::Store`] on read failures. Rows dated where the baseline
    /// window is empty carry no climatology.
    #[tracing::instrument(skip(self, key), fields(key = %key))]
    pub fn ranged_series(
        &self,
        key: &LogicalSeriesKey,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RangedSeries, QueryError> {
        let range = DateRange::new(start, end)?;
        let points = self.store.fetch_series(key, None)?;
        let profile = unless_window_empty(
            &points,
            compute_climatology(
                &points,
                self.config.baseline_cutoff(),
                self.config.central_quantile(),
            ),
        )?;
        let observations = self.store.fetch_observations(
            key.zone_id(),
            key.indicator_id(),
            key.depth(),
            Some(&range),
        )?;

        let joined = join(within(&points, &range), &observations);
        let rmse = compute_rmse(&joined, &range);
        let rows: Vec<RangedRow> = joined
            .rows()
            .iter()
            .map(|r| {
                let entry = profile.as_ref().and_then(|p| p.at(r.date));
                RangedRow {
                    date: r.date,
                    value: r.value.is_finite().then_some(r.value),
                    climatology: entry.map(|e| e.central),
                    stddev: entry.and_then(|e| e.stddev),
                    observation: r.observation,
                }
            })
            .collect();

        debug!(
            n_days = range.n_days(),
            n_rows = rows.len(),
            n_observed = joined.n_observed(),
            ?rmse,
            "ranged series"
        );
        Ok(RangedSeries { range, rows, rmse })
    }

    /// Quantile band for every series date in `[start, end]`.
    ///
    /// The envelope uses the configured range window; a date whose bucket
    /// has no data in that window gets `None` bounds.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Calendar`] if `start > end`,
    /// [`QueryError::Climatology`] if the series has no finite value or a
    /// quantile is out of range, and [`QueryError::Store`] on read failures.
    #[tracing::instrument(skip(self, key), fields(key = %key))]
    pub fn ranged_quantile_band(
        &self,
        key: &LogicalSeriesKey,
        start: NaiveDate,
        end: NaiveDate,
        q_lower: f64,
        q_upper: f64,
    ) -> Result<RangedQuantileBand, QueryError> {
        let range = DateRange::new(start, end)?;
        let window = self.config.range_window();
        let points = self.store.fetch_series(key, None)?;
        let envelope = unless_window_empty(
            &points,
            compute_quantile_band(
                &points,
                q_lower,
                q_upper,
                window,
                self.config.baseline_cutoff(),
            ),
        )?;

        let rows: Vec<DatedBand> = within(&points, &range)
            .iter()
            .map(|p| {
                let band = envelope.as_ref().and_then(|e| e.at(p.date));
                DatedBand {
                    date: p.date,
                    lower: band.map(|b| b.lower),
                    upper: band.map(|b| b.upper),
                }
            })
            .collect();

        debug!(n_days = range.n_days(), n_rows = rows.len(), ?window, "ranged quantile band");
        Ok(RangedQuantileBand {
            range,
            q_lower,
            q_upper,
            window,
            rows,
        })
    }

    /// Standardized annual anomalies of the whole series.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Climatology`] for empty series, short or
    /// degenerate baselines, and [`QueryError::Store`] on read failures.
    #[tracing::instrument(skip(self, key), fields(key = %key))]
    pub fn annual_anomaly_series(
        &self,
        key: &LogicalSeriesKey,
    ) -> Result<AnnualAnomalySeries, QueryError> {
        let points = self.store.fetch_series(key, None)?;
        Ok(compute_annual_anomalies(
            &points,
            self.config.baseline_year_count(),
            self.config.baseline_policy(),
        )?)
    }
}

/// Maps an empty statistics window to `None` while the series itself has
/// data, so the figures that do not depend on the window stay available.
fn unless_window_empty<T>(
    points: &[TimeSeriesPoint],
    result: Result<T, ClimatologyError>,
) -> Result<Option<T>, QueryError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(ClimatologyError::InsufficientData { context })
            if points.iter().any(|p| p.finite_value().is_some()) =>
        {
            debug!(context, "statistics window is empty");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn point_on(points: &[TimeSeriesPoint], date: NaiveDate) -> Option<&TimeSeriesPoint> {
    points
        .binary_search_by_key(&date, |p| p.date)
        .ok()
        .map(|i| &points[i])
}

fn within<'a>(points: &'a [TimeSeriesPoint], range: &DateRange) -> &'a [TimeSeriesPoint] {
    let lo = points.partition_point(|p| p.date < range.start());
    let hi = points.partition_point(|p| p.date <= range.end());
    &points[lo..hi]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpa_climatology::TimeseriesType;
    use mpa_store::InMemorySeriesStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn within_is_inclusive() {
        let points: Vec<TimeSeriesPoint> = (1..=10)
            .map(|d| TimeSeriesPoint::new(date(2021, 1, d), d as f64))
            .collect();
        let range = DateRange::new(date(2021, 1, 3), date(2021, 1, 5)).unwrap();
        assert_eq!(within(&points, &range).len(), 3);
        assert!(point_on(&points, date(2021, 1, 11)).is_none());
        assert_eq!(point_on(&points, date(2021, 1, 4)).unwrap().value, 4.0);
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let config = QueryConfig::new().with_central_quantile(1.5);
        let err = QueryFacade::new(InMemorySeriesStore::new(), config).unwrap_err();
        assert!(matches!(err, QueryError::InvalidConfig { .. }));
    }

    #[test]
    fn reversed_range_is_calendar_error() {
        let facade = QueryFacade::new(InMemorySeriesStore::new(), QueryConfig::new()).unwrap();
        let key = LogicalSeriesKey::new(1, 1, TimeseriesType::Bottom, 1);
        let err = facade
            .ranged_series(&key, date(2021, 2, 1), date(2021, 1, 1))
            .unwrap_err();
        assert!(matches!(err, QueryError::Calendar(_)));
    }

    #[test]
    fn unknown_key_is_no_data() {
        let facade = QueryFacade::new(InMemorySeriesStore::new(), QueryConfig::new()).unwrap();
        let key = LogicalSeriesKey::new(1, 1, TimeseriesType::Bottom, 1);
        let err = facade
            .selected_date_snapshot(&key, date(2021, 1, 1), 0.1, 0.9)
            .unwrap_err();
        assert!(err.is_no_data());
    }
}
