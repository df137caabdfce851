use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Marine protected area climatology and anomaly analytics.
#[derive(Parser)]
#[command(
    name = "mpa-climate",
    version,
    about = "Climatology, quantile bands and anomalies for marine indicator series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Everything shown for one date of one series.
    Snapshot(SnapshotArgs),
    /// Series over a date range with climatology, observations and RMSE.
    Range(RangeArgs),
    /// Per-date quantile bands over a date range.
    Quantiles(QuantilesArgs),
    /// Standardized annual anomalies of one series.
    Anomalies(AnomaliesArgs),
    /// Compute annual anomaly indicators for every depth-less series.
    Batch(BatchArgs),
}

/// Options shared by every subcommand.
#[derive(clap::Args)]
pub struct ProjectArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "mpa-climate.toml")]
    pub config: PathBuf,

    /// Write JSON here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Identifies one series of the project.
#[derive(clap::Args)]
pub struct SeriesArgs {
    #[arg(long)]
    pub zone: i64,

    #[arg(long)]
    pub model: i64,

    /// `bottom` or `surface`.
    #[arg(long = "type", default_value = "bottom")]
    pub timeseries_type: String,

    #[arg(long)]
    pub indicator: i64,

    /// Depth in metres; omit for the depth-less series.
    #[arg(long)]
    pub depth: Option<i32>,
}

/// Arguments for the `snapshot` subcommand.
#[derive(clap::Args)]
pub struct SnapshotArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub series: SeriesArgs,

    /// Date to report (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,

    /// Override the lower quantile from config.
    #[arg(long)]
    pub q_lower: Option<f64>,

    /// Override the upper quantile from config.
    #[arg(long)]
    pub q_upper: Option<f64>,
}

/// Arguments for the `range` subcommand.
#[derive(clap::Args)]
pub struct RangeArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub series: SeriesArgs,

    /// First date (inclusive).
    #[arg(long)]
    pub start: NaiveDate,

    /// Last date (inclusive).
    #[arg(long)]
    pub end: NaiveDate,
}

/// Arguments for the `quantiles` subcommand.
#[derive(clap::Args)]
pub struct QuantilesArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub series: SeriesArgs,

    /// First date (inclusive).
    #[arg(long)]
    pub start: NaiveDate,

    /// Last date (inclusive).
    #[arg(long)]
    pub end: NaiveDate,

    /// Override the lower quantile from config.
    #[arg(long)]
    pub q_lower: Option<f64>,

    /// Override the upper quantile from config.
    #[arg(long)]
    pub q_upper: Option<f64>,
}

/// Arguments for the `anomalies` subcommand.
#[derive(clap::Args)]
pub struct AnomaliesArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub series: SeriesArgs,
}

/// Arguments for the `batch` subcommand.
#[derive(clap::Args)]
pub struct BatchArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Override [batch].indicator_id from config.
    #[arg(long)]
    pub indicator: Option<i64>,

    /// Override [batch].threads from config.
    #[arg(long)]
    pub threads: Option<usize>,
}
