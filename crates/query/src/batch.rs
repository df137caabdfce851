//! Batch computation of persisted annual anomaly indicators.
//!
//! One job per depth-less series of an indicator. Jobs are independent and
//! run on the rayon pool; each one replaces its target's rows, so a re-run
//! converges on the same row set.

use mpa_climatology::{LogicalSeriesKey, TimeseriesType};
use mpa_store::{AnomalySink, IndicatorTarget, SeriesStore};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::QueryError;
use crate::facade::QueryFacade;

/// Indicator type id written for each timeseries type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorTypeIds {
    pub bottom: i64,
    pub surface: i64,
}

impl IndicatorTypeIds {
    pub fn new(bottom: i64, surface: i64) -> Self {
        Self { bottom, surface }
    }

    pub fn for_type(&self, t: TimeseriesType) -> i64 {
        match t {
            TimeseriesType::Bottom => self.bottom,
            TimeseriesType::Surface => self.surface,
        }
    }
}

/// One series to standardize and the indicator it is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnomalyJob {
    pub key: LogicalSeriesKey,
    pub target: IndicatorTarget,
}

/// Result of one job. A failure never aborts the other jobs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobOutcome {
    /// Rows written, one per year.
    Written { years: usize },
    /// The series had no finite values; prior rows were still removed.
    Skipped,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobReport {
    pub job: AnomalyJob,
    pub outcome: JobOutcome,
}

/// Plans one job per depth-less series of `indicator_id`.
///
/// Series pinned to a depth are skipped: the persisted indicator only
/// covers the total-average bottom and the surface series. Jobs come out
/// in key order.
pub fn plan_anomaly_jobs<'a>(
    keys: impl IntoIterator<Item = &'a LogicalSeriesKey>,
    indicator_id: i64,
    type_ids: &IndicatorTypeIds,
) -> Vec<AnomalyJob> {
    let mut jobs: Vec<AnomalyJob> = keys
        .into_iter()
        .filter(|k| k.depth().is_none() && k.indicator_id() == indicator_id)
        .map(|k| AnomalyJob {
            key: *k,
            target: IndicatorTarget::new(
                k.zone_id(),
                k.climate_model_id(),
                type_ids.for_type(k.timeseries_type()),
            ),
        })
        .collect();
    jobs.sort_by_key(|j| j.key);
    jobs
}

/// Runs every job in parallel and reports each outcome, in job order.
pub fn run_anomaly_batch<S, K>(
    facade: &QueryFacade<S>,
    sink: &K,
    jobs: &[AnomalyJob],
) -> Vec<JobReport>
where
    S: SeriesStore,
    K: AnomalySink,
{
    let reports: Vec<JobReport> = jobs
        .par_iter()
        .map(|job| JobReport {
            job: *job,
            outcome: match run_job(facade, sink, job) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(key = %job.key, error = %e, "anomaly job failed");
                    JobOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            },
        })
        .collect();

    let written = reports
        .iter()
        .filter(|r| matches!(r.outcome, JobOutcome::Written { .. }))
        .count();
    info!(n_jobs = jobs.len(), written, "anomaly batch finished");
    reports
}

#[tracing::instrument(skip(facade, sink, job), fields(key = %job.key))]
fn run_job<S, K>(
    facade: &QueryFacade<S>,
    sink: &K,
    job: &AnomalyJob,
) -> Result<JobOutcome, QueryError>
where
    S: SeriesStore,
    K: AnomalySink,
{
    let removed = sink.delete_annual_anomalies(&job.target)?;
    tracing::debug!(removed, target = %job.target, "prior rows removed");

    let series = match facade.annual_anomaly_series(&job.key) {
        Ok(s) => s,
        Err(e) if e.is_no_data() => return Ok(JobOutcome::Skipped),
        Err(e) => return Err(e),
    };
    for row in series.rows() {
        sink.upsert_annual_anomaly(&job.target, row.year, row.anomaly)?;
    }
    Ok(JobOutcome::Written {
        years: series.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_skips_depth_series_and_other_indicators() {
        let keys = [
            LogicalSeriesKey::new(2, 1, TimeseriesType::Surface, 1),
            LogicalSeriesKey::new(1, 1, TimeseriesType::Bottom, 1),
            LogicalSeriesKey::new(1, 1, TimeseriesType::Bottom, 1).with_depth(Some(40)),
            LogicalSeriesKey::new(1, 1, TimeseriesType::Bottom, 3),
        ];
        let ids = IndicatorTypeIds::new(10, 11);
        let jobs = plan_anomaly_jobs(&keys, 1, &ids);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].key.zone_id(), 1);
        assert_eq!(jobs[0].target, IndicatorTarget::new(1, 1, 10));
        assert_eq!(jobs[1].target, IndicatorTarget::new(2, 1, 11));
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_string(&JobOutcome::Written { years: 3 }).unwrap();
        assert_eq!(json, r#"{"status":"written","years":3}"#);
        let json = serde_json::to_string(&JobOutcome::Skipped).unwrap();
        assert_eq!(json, r#"{"status":"skipped"}"#);
    }
}
