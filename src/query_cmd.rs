//! Query commands: one facade operation per subcommand, JSON out.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use mpa_calendar::DayOfYear;
use mpa_climatology::{AnnualAnomalySeries, LogicalSeriesKey};
use mpa_query::{
    DateSnapshot, RangedQuantileBand, RangedSeries, ThermalExposure, ThermalRange, WaveStatus,
};

use crate::cli::{AnomaliesArgs, QuantilesArgs, RangeArgs, SnapshotArgs};
use crate::convert;
use crate::project::{Project, series_key, write_json};

#[derive(Serialize)]
struct SnapshotOutput {
    key: LogicalSeriesKey,
    day_of_year: DayOfYear,
    q_lower: f64,
    q_upper: f64,
    #[serde(flatten)]
    snapshot: DateSnapshot,
    delta: Option<f64>,
    dial_position: f64,
    wave_status: Option<WaveStatus>,
}

#[derive(Serialize)]
struct SpeciesExposure {
    name: String,
    range: ThermalRange,
    exposure: ThermalExposure,
}

#[derive(Serialize)]
struct RangeOutput {
    key: LogicalSeriesKey,
    #[serde(flatten)]
    series: RangedSeries,
    species: Vec<SpeciesExposure>,
}

#[derive(Serialize)]
struct QuantilesOutput {
    key: LogicalSeriesKey,
    #[serde(flatten)]
    bands: RangedQuantileBand,
}

#[derive(Serialize)]
struct AnomaliesOutput {
    key: LogicalSeriesKey,
    #[serde(flatten)]
    anomalies: AnnualAnomalySeries,
}

/// Run the `snapshot` subcommand.
pub fn run_snapshot(args: SnapshotArgs) -> Result<()> {
    let _cmd = info_span!("snapshot").entered();
    let project = Project::load(&args.project.config)?;
    let facade = project.facade()?;
    let key = series_key(&args.series)?;
    let q_lower = args.q_lower.unwrap_or(project.config.quantiles.lower);
    let q_upper = args.q_upper.unwrap_or(project.config.quantiles.upper);

    info!(%key, date = %args.date, "computing snapshot");
    let snapshot = facade
        .selected_date_snapshot(&key, args.date, q_lower, q_upper)
        .with_context(|| format!("snapshot failed for {key} on {}", args.date))?;

    let output = SnapshotOutput {
        key,
        day_of_year: DayOfYear::from_date(args.date),
        q_lower,
        q_upper,
        delta: snapshot.delta(),
        dial_position: snapshot.dial_position(),
        wave_status: snapshot.wave_status(),
        snapshot,
    };
    write_json(&output, args.project.output.as_deref())
}

/// Run the `range` subcommand.
pub fn run_range(args: RangeArgs) -> Result<()> {
    let _cmd = info_span!("range").entered();
    let project = Project::load(&args.project.config)?;
    let facade = project.facade()?;
    let key = series_key(&args.series)?;
    let species = convert::build_species(&project.config.species)?;

    info!(%key, start = %args.start, end = %args.end, "computing ranged series");
    let series = facade
        .ranged_series(&key, args.start, args.end)
        .with_context(|| format!("range query failed for {key}"))?;
    info!(n_rows = series.len(), rmse = ?series.rmse(), "ranged series computed");

    let species = species
        .into_iter()
        .map(|(name, range)| SpeciesExposure {
            exposure: range.exposure(&series),
            name,
            range,
        })
        .collect();

    write_json(
        &RangeOutput {
            key,
            series,
            species,
        },
        args.project.output.as_deref(),
    )
}

/// Run the `quantiles` subcommand.
pub fn run_quantiles(args: QuantilesArgs) -> Result<()> {
    let _cmd = info_span!("quantiles").entered();
    let project = Project::load(&args.project.config)?;
    let facade = project.facade()?;
    let key = series_key(&args.series)?;
    let q_lower = args.q_lower.unwrap_or(project.config.quantiles.lower);
    let q_upper = args.q_upper.unwrap_or(project.config.quantiles.upper);

    info!(%key, q_lower, q_upper, "computing quantile bands");
    let bands = facade
        .ranged_quantile_band(&key, args.start, args.end, q_lower, q_upper)
        .with_context(|| format!("quantile query failed for {key}"))?;

    write_json(&QuantilesOutput { key, bands }, args.project.output.as_deref())
}

/// Run the `anomalies` subcommand.
pub fn run_anomalies(args: AnomaliesArgs) -> Result<()> {
    let _cmd = info_span!("anomalies").entered();
    let project = Project::load(&args.project.config)?;
    let facade = project.facade()?;
    let key = series_key(&args.series)?;

    info!(%key, "computing annual anomalies");
    let anomalies = facade
        .annual_anomaly_series(&key)
        .with_context(|| format!("anomaly query failed for {key}"))?;
    info!(
        n_years = anomalies.len(),
        baseline_std = anomalies.baseline_std(),
        "annual anomalies computed"
    );

    write_json(
        &AnomaliesOutput { key, anomalies },
        args.project.output.as_deref(),
    )
}
