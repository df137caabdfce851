//! Project loading: TOML config, CSV files, JSON output.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use mpa_climatology::LogicalSeriesKey;
use mpa_query::{QueryConfig, QueryFacade};
use mpa_store::{InMemorySeriesStore, read_observations_csv, read_series_csv};

use crate::cli::SeriesArgs;
use crate::config::ProjectConfig;
use crate::convert;

/// A parsed config plus the directory its relative paths resolve against.
pub struct Project {
    pub config: ProjectConfig,
    pub base_dir: PathBuf,
}

impl Project {
    /// Reads and parses the project TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: ProjectConfig =
            toml::from_str(&toml_str).context("failed to parse TOML config")?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self { config, base_dir })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn query_config(&self) -> Result<QueryConfig> {
        convert::build_query_config(&self.config.engine, &self.config.anomaly)
    }

    /// Reads every `[[series]]` and `[[observations]]` file into a store.
    pub fn load_store(&self) -> Result<InMemorySeriesStore> {
        let mut store = InMemorySeriesStore::new();

        for entry in &self.config.series {
            let key = convert::build_series_key(entry)?;
            let path = self.resolve(&entry.path);
            let points = read_series_csv(&path)
                .with_context(|| format!("failed to read series {key} from {}", path.display()))?;
            store
                .insert_series(key, points)
                .with_context(|| format!("invalid series {key}"))?;
        }

        for entry in &self.config.observations {
            let path = self.resolve(&entry.path);
            let observations = read_observations_csv(&path).with_context(|| {
                format!("failed to read observations from {}", path.display())
            })?;
            store
                .insert_observations(entry.zone, entry.indicator, entry.depth, observations)
                .with_context(|| format!("invalid observations in {}", path.display()))?;
        }

        info!(
            n_series = store.len(),
            n_observation_files = self.config.observations.len(),
            "project data loaded"
        );
        Ok(store)
    }

    /// Loads the store and wraps it in a facade.
    pub fn facade(&self) -> Result<QueryFacade<InMemorySeriesStore>> {
        let facade = QueryFacade::new(self.load_store()?, self.query_config()?)?;
        Ok(facade)
    }
}

/// Builds the key named on the command line.
pub fn series_key(args: &SeriesArgs) -> Result<LogicalSeriesKey> {
    let t = convert::parse_timeseries_type(&args.timeseries_type)?;
    Ok(LogicalSeriesKey::new(args.zone, args.model, t, args.indicator).with_depth(args.depth))
}

/// Writes pretty JSON to `output`, or stdout when `None`.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write to stdout")?;
        }
    }
    Ok(())
}
