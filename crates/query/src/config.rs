//! Behavioral knobs of the query facade.

use chrono::NaiveDate;
use mpa_climatology::{
    BaselinePolicy, DEFAULT_BASELINE_YEAR_COUNT, DEFAULT_CENTRAL_QUANTILE, QuantileWindow,
};

use crate::error::QueryError;

/// End of the default 30-year climatological baseline (1993-2022).
pub const DEFAULT_BASELINE_CUTOFF: NaiveDate = match NaiveDate::from_ymd_opt(2022, 12, 31) {
    Some(d) => d,
    None => panic!("invalid default baseline cutoff"),
};

/// Configuration shared by every facade operation.
///
/// Every choice that used to drift between call sites is named here: the
/// baseline cutoff, the central quantile, the anomaly baseline length and
/// its shortfall policy, and which window feeds quantile bands for
/// snapshots and for ranges.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Last date included in the climatological baseline.
    baseline_cutoff: NaiveDate,
    /// Quantile reported as "climatology".
    central_quantile: f64,
    /// Number of leading years forming the anomaly baseline.
    baseline_year_count: usize,
    /// Behaviour when fewer years exist than `baseline_year_count`.
    baseline_policy: BaselinePolicy,
    /// Window feeding the quantile band of a selected-date snapshot.
    snapshot_window: QuantileWindow,
    /// Window feeding ranged quantile bands.
    range_window: QuantileWindow,
}

impl QueryConfig {
    /// Creates a configuration with the default knobs.
    pub fn new() -> Self {
        Self {
            baseline_cutoff: DEFAULT_BASELINE_CUTOFF,
            central_quantile: DEFAULT_CENTRAL_QUANTILE,
            baseline_year_count: DEFAULT_BASELINE_YEAR_COUNT,
            baseline_policy: BaselinePolicy::Strict,
            snapshot_window: QuantileWindow::BaselineOnly,
            range_window: QuantileWindow::Full,
        }
    }

    pub fn with_baseline_cutoff(mut self, cutoff: NaiveDate) -> Self {
        self.baseline_cutoff = cutoff;
        self
    }

    pub fn with_central_quantile(mut self, q: f64) -> Self {
        self.central_quantile = q;
        self
    }

    pub fn with_baseline_year_count(mut self, count: usize) -> Self {
        self.baseline_year_count = count;
        self
    }

    pub fn with_baseline_policy(mut self, policy: BaselinePolicy) -> Self {
        self.baseline_policy = policy;
        self
    }

    pub fn with_snapshot_window(mut self, window: QuantileWindow) -> Self {
        self.snapshot_window = window;
        self
    }

    pub fn with_range_window(mut self, window: QuantileWindow) -> Self {
        self.range_window = window;
        self
    }

    // --- Accessors ---

    pub fn baseline_cutoff(&self) -> NaiveDate {
        self.baseline_cutoff
    }

    pub fn central_quantile(&self) -> f64 {
        self.central_quantile
    }

    pub fn baseline_year_count(&self) -> usize {
        self.baseline_year_count
    }

    pub fn baseline_policy(&self) -> BaselinePolicy {
        self.baseline_policy
    }

    pub fn snapshot_window(&self) -> QuantileWindow {
        self.snapshot_window
    }

    pub fn range_window(&self) -> QuantileWindow {
        self.range_window
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), QueryError> {
        if !(0.0..=1.0).contains(&self.central_quantile) {
            return Err(QueryError::InvalidConfig {
                reason: format!(
                    "central_quantile must be within 0..=1, got {}",
                    self.central_quantile
                ),
            });
        }
        if self.baseline_year_count < 2 {
            return Err(QueryError::InvalidConfig {
                reason: format!(
                    "baseline_year_count must be >= 2, got {}",
                    self.baseline_year_count
                ),
            });
        }
        Ok(())
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self::new()
    }
}
