//! Integration tests: batch anomaly persistence with replace semantics.

use approx::assert_relative_eq;
use chrono::{Datelike, NaiveDate};
use mpa_climatology::{LogicalSeriesKey, TimeSeriesPoint, TimeseriesType};
use mpa_query::{
    IndicatorTypeIds, JobOutcome, QueryConfig, QueryFacade, plan_anomaly_jobs, run_anomaly_batch,
};
use mpa_store::{AnomalySink, InMemoryAnomalySink, InMemorySeriesStore, IndicatorTarget};

const TEMPERATURE: i64 = 1;
const IDS: IndicatorTypeIds = IndicatorTypeIds {
    bottom: 21,
    surface: 22,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn yearly_levels(levels: &[f64]) -> Vec<TimeSeriesPoint> {
    date(2000, 1, 1)
        .iter_days()
        .take_while(|d| d.year() < 2000 + levels.len() as i32)
        .map(|d| TimeSeriesPoint::new(d, levels[(d.year() - 2000) as usize]))
        .collect()
}

fn store() -> InMemorySeriesStore {
    let mut store = InMemorySeriesStore::new();
    let warming = yearly_levels(&[10.0, 11.0, 12.0, 15.0]);
    store
        .insert_series(
            LogicalSeriesKey::new(1, 1, TimeseriesType::Bottom, TEMPERATURE),
            warming.clone(),
        )
        .unwrap();
    store
        .insert_series(
            LogicalSeriesKey::new(1, 1, TimeseriesType::Surface, TEMPERATURE),
            warming.clone(),
        )
        .unwrap();
    // depth-pinned series are not part of the indicator
    store
        .insert_series(
            LogicalSeriesKey::new(1, 1, TimeseriesType::Bottom, TEMPERATURE).with_depth(Some(40)),
            warming,
        )
        .unwrap();
    // no data at all
    store
        .insert_series(
            LogicalSeriesKey::new(2, 1, TimeseriesType::Bottom, TEMPERATURE),
            yearly_levels(&[f64::NAN, f64::NAN]),
        )
        .unwrap();
    // flat baseline
    store
        .insert_series(
            LogicalSeriesKey::new(3, 1, TimeseriesType::Bottom, TEMPERATURE),
            yearly_levels(&[10.0, 10.0, 10.0, 12.0]),
        )
        .unwrap();
    store
}

fn facade() -> QueryFacade<InMemorySeriesStore> {
    QueryFacade::new(store(), QueryConfig::new().with_baseline_year_count(3)).unwrap()
}

#[test]
fn plan_covers_depthless_series_only() {
    let f = facade();
    let jobs = plan_anomaly_jobs(f.store().keys(), TEMPERATURE, &IDS);
    assert_eq!(jobs.len(), 4);
    assert!(jobs.iter().all(|j| j.key.depth().is_none()));
    assert_eq!(jobs[1].target, IndicatorTarget::new(1, 1, 22));
}

#[test]
fn batch_reports_each_outcome() {
    let f = facade();
    let sink = InMemoryAnomalySink::new();
    let jobs = plan_anomaly_jobs(f.store().keys(), TEMPERATURE, &IDS);
    let reports = run_anomaly_batch(&f, &sink, &jobs);

    assert_eq!(reports.len(), 4);
    assert_eq!(reports[0].outcome, JobOutcome::Written { years: 4 });
    assert_eq!(reports[1].outcome, JobOutcome::Written { years: 4 });
    assert_eq!(reports[2].outcome, JobOutcome::Skipped);
    assert!(matches!(reports[3].outcome, JobOutcome::Failed { .. }));

    let bottom = sink.rows_for(&IndicatorTarget::new(1, 1, 21)).unwrap();
    assert_eq!(bottom.len(), 4);
    // baseline [10, 11, 12]: mean 11, sd 1
    assert_relative_eq!(bottom[3].value, 4.0, epsilon = 1e-12);
    assert_eq!(sink.rows().unwrap().len(), 8);
}

#[test]
fn rerun_replaces_rows() {
    let f = facade();
    let sink = InMemoryAnomalySink::new();
    let jobs = plan_anomaly_jobs(f.store().keys(), TEMPERATURE, &IDS);

    run_anomaly_batch(&f, &sink, &jobs);
    let first = sink.rows().unwrap();
    run_anomaly_batch(&f, &sink, &jobs);
    let second = sink.rows().unwrap();
    assert_eq!(first, second);
}

#[test]
fn stale_rows_removed_even_without_data() {
    let f = facade();
    let sink = InMemoryAnomalySink::new();
    let empty_zone = IndicatorTarget::new(2, 1, 21);
    sink.upsert_annual_anomaly(&empty_zone, 1999, 0.7).unwrap();
    sink.upsert_annual_anomaly(&empty_zone, 2000, 0.9).unwrap();

    let jobs = plan_anomaly_jobs(f.store().keys(), TEMPERATURE, &IDS);
    run_anomaly_batch(&f, &sink, &jobs);
    assert!(sink.rows_for(&empty_zone).unwrap().is_empty());
}
