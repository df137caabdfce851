use std::path::PathBuf;

use serde::Deserialize;

/// Top-level project configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Climatology engine settings.
    #[serde(default)]
    pub engine: EngineToml,

    /// Default quantile pair for snapshot and band queries.
    #[serde(default)]
    pub quantiles: QuantilesToml,

    /// Annual anomaly settings.
    #[serde(default)]
    pub anomaly: AnomalyToml,

    /// Batch indicator job settings.
    #[serde(default)]
    pub batch: BatchToml,

    /// Model series files.
    #[serde(default)]
    pub series: Vec<SeriesToml>,

    /// Observation files.
    #[serde(default)]
    pub observations: Vec<ObservationsToml>,

    /// Species thermal ranges reported by range queries.
    #[serde(default)]
    pub species: Vec<SpeciesToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineToml {
    /// Last baseline day, `YYYY-MM-DD`, or a bare year for its December 31.
    #[serde(default = "default_baseline_cutoff")]
    pub baseline_cutoff: String,
    #[serde(default = "default_central_quantile")]
    pub central_quantile: f64,
    #[serde(default = "default_snapshot_window")]
    pub snapshot_window: String,
    #[serde(default = "default_range_window")]
    pub range_window: String,
}

impl Default for EngineToml {
    fn default() -> Self {
        Self {
            baseline_cutoff: default_baseline_cutoff(),
            central_quantile: default_central_quantile(),
            snapshot_window: default_snapshot_window(),
            range_window: default_range_window(),
        }
    }
}

fn default_baseline_cutoff() -> String {
    "2022-12-31".to_string()
}
fn default_central_quantile() -> f64 {
    0.5
}
fn default_snapshot_window() -> String {
    "baseline_only".to_string()
}
fn default_range_window() -> String {
    "full".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuantilesToml {
    #[serde(default = "default_q_lower")]
    pub lower: f64,
    #[serde(default = "default_q_upper")]
    pub upper: f64,
}

impl Default for QuantilesToml {
    fn default() -> Self {
        Self {
            lower: default_q_lower(),
            upper: default_q_upper(),
        }
    }
}

fn default_q_lower() -> f64 {
    0.1
}
fn default_q_upper() -> f64 {
    0.9
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnomalyToml {
    #[serde(default = "default_baseline_year_count")]
    pub baseline_year_count: usize,
    #[serde(default = "default_policy")]
    pub policy: String,
}

impl Default for AnomalyToml {
    fn default() -> Self {
        Self {
            baseline_year_count: default_baseline_year_count(),
            policy: default_policy(),
        }
    }
}

fn default_baseline_year_count() -> usize {
    30
}
fn default_policy() -> String {
    "strict".to_string()
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct BatchToml {
    /// Indicator whose series are standardized.
    pub indicator_id: Option<i64>,
    /// Indicator type id written for bottom series.
    pub bottom_indicator_type_id: Option<i64>,
    /// Indicator type id written for surface series.
    pub surface_indicator_type_id: Option<i64>,
    /// Worker threads; all cores when unset.
    #[serde(default)]
    pub threads: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesToml {
    pub zone: i64,
    pub model: i64,
    #[serde(rename = "type")]
    pub timeseries_type: String,
    pub indicator: i64,
    #[serde(default)]
    pub depth: Option<i32>,
    /// `date,value` CSV, relative to the config file.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservationsToml {
    pub zone: i64,
    pub indicator: i64,
    #[serde(default)]
    pub depth: Option<i32>,
    /// `date,value,count,std` CSV, relative to the config file.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeciesToml {
    pub name: String,
    pub lower: f64,
    pub upper: f64,
}
