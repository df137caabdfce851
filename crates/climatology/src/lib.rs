//! # mpa-climatology
//!
//! Climatology and anomaly analytics for marine-protected-area indicator
//! series: day-of-year baselines, quantile envelopes, deviation bounds,
//! model/observation error and annual standardized anomalies.
//!
//! # Pipeline
//!
//! ```text
//!  ordered points ──┬──▶ compute_climatology ──▶ ClimatologyProfile ──▶ compute_deviation_bounds
//!                   ├──▶ compute_quantile_band ──▶ QuantileEnvelope
//!                   ├──▶ join (+ observations) ──▶ JoinedSeries ──▶ compute_rmse
//!                   └──▶ compute_annual_anomalies ──▶ AnnualAnomalySeries
//! ```
//!
//! Every function is pure: inputs are borrowed, outputs are owned, and the
//! same input always yields bit-identical output. Inputs must be sorted
//! ascending by date with no duplicate dates; nothing here re-sorts.
//! Non-finite values count as missing: they never enter a statistic but
//! keep their place in the series.
//!
//! # Quick start
//!
//! ```ignore
//! use mpa_climatology::{compute_climatology, compute_quantile_band, QuantileWindow};
//!
//! let cutoff = mpa_calendar::year_end(2022)?;
//! let profile = compute_climatology(&points, cutoff, 0.5)?;
//! let band = compute_quantile_band(&points, 0.1, 0.9, QuantileWindow::BaselineOnly, cutoff)?;
//! ```

mod anomaly;
mod bounds;
mod error;
mod grouping;
mod join;
mod profile;
mod quantile;
mod series;

pub use anomaly::{
    AnnualAnomaly, AnnualAnomalySeries, AnnualMean, BaselinePolicy, DEFAULT_BASELINE_YEAR_COUNT,
    annual_means, compute_annual_anomalies,
};
pub use bounds::{DeviationBounds, compute_deviation_bounds};
pub use error::ClimatologyError;
pub use join::{JoinedRow, JoinedSeries, ObservationSummary, compute_rmse, join};
pub use profile::{
    ClimatologyEntry, ClimatologyProfile, DEFAULT_CENTRAL_QUANTILE, compute_climatology,
};
pub use quantile::{QuantileBand, QuantileEnvelope, QuantileWindow, compute_quantile_band};
pub use series::{LogicalSeriesKey, ObservationPoint, TimeSeriesPoint, TimeseriesType};
