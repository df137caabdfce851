//! Batch command: persist annual anomaly indicators for a whole project.

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{info, info_span, warn};

use mpa_query::{JobOutcome, JobReport, plan_anomaly_jobs, run_anomaly_batch};
use mpa_store::{AnomalyRow, InMemoryAnomalySink};

use crate::cli::BatchArgs;
use crate::convert;
use crate::project::{Project, write_json};

#[derive(Serialize)]
struct BatchOutput {
    indicator_id: i64,
    jobs: Vec<LabelledReport>,
    rows: Vec<AnomalyRow>,
}

/// A job report with the display name of the indicator it writes.
#[derive(Serialize)]
struct LabelledReport {
    indicator_name: String,
    #[serde(flatten)]
    report: JobReport,
}

fn indicator_name(report: &JobReport) -> String {
    format!(
        "{} standardized anomaly",
        report.job.key.timeseries_type().label()
    )
}

/// Run the `batch` subcommand.
pub fn run(args: BatchArgs) -> Result<()> {
    let _cmd = info_span!("batch").entered();
    let project = Project::load(&args.project.config)?;
    let batch = &project.config.batch;

    let indicator_id = args.indicator.or(batch.indicator_id).ok_or_else(|| {
        anyhow!("no indicator: set [batch].indicator_id in config or use --indicator")
    })?;
    let type_ids = convert::build_type_ids(batch)?;
    let facade = project.facade()?;

    let jobs = plan_anomaly_jobs(facade.store().keys(), indicator_id, &type_ids);
    info!(n_jobs = jobs.len(), indicator_id, "anomaly jobs planned");

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(n) = args.threads.or(batch.threads) {
        pool = pool.num_threads(n);
    }
    let pool = pool.build().context("failed to build worker pool")?;

    let sink = InMemoryAnomalySink::new();
    let reports = pool.install(|| run_anomaly_batch(&facade, &sink, &jobs));

    let jobs: Vec<LabelledReport> = reports
        .into_iter()
        .map(|r| {
            let name = indicator_name(&r);
            match &r.outcome {
                JobOutcome::Written { years } => {
                    info!(key = %r.job.key, indicator = %name, years, "indicator written")
                }
                JobOutcome::Skipped => info!(key = %r.job.key, "no data, skipped"),
                JobOutcome::Failed { reason } => warn!(key = %r.job.key, %reason, "job failed"),
            }
            LabelledReport {
                indicator_name: name,
                report: r,
            }
        })
        .collect();

    let rows = sink.rows().context("failed to read anomaly rows")?;
    write_json(
        &BatchOutput {
            indicator_id,
            jobs,
            rows,
        },
        args.project.output.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpa_climatology::{LogicalSeriesKey, TimeseriesType};
    use mpa_query::AnomalyJob;
    use mpa_store::IndicatorTarget;

    #[test]
    fn indicator_names_follow_series_type() {
        let report = |t| JobReport {
            job: AnomalyJob {
                key: LogicalSeriesKey::new(62, 1, t, 1),
                target: IndicatorTarget::new(62, 1, 21),
            },
            outcome: JobOutcome::Skipped,
        };
        assert_eq!(
            indicator_name(&report(TimeseriesType::Bottom)),
            "Total Average Bottom standardized anomaly"
        );
        assert_eq!(
            indicator_name(&report(TimeseriesType::Surface)),
            "Surface standardized anomaly"
        );
    }
}
