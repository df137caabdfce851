//! # mpa-query
//!
//! The read operations the API and report layers call, composed from a
//! [`SeriesStore`](mpa_store::SeriesStore) and the `mpa-climatology` engine,
//! plus the batch job that persists annual anomaly indicators.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     S["SeriesStore"] --> F["QueryFacade"]
//!     C["QueryConfig"] --> F
//!     F -->|"selected_date_snapshot()"| D["DateSnapshot"]
//!     F -->|"ranged_series()"| R["RangedSeries"]
//!     F -->|"ranged_quantile_band()"| Q["RangedQuantileBand"]
//!     F -->|"annual_anomaly_series()"| A["AnnualAnomalySeries"]
//!     F --> B["run_anomaly_batch()"]
//!     B --> K["AnomalySink"]
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | `QueryConfig`: baseline cutoff, windows, anomaly baseline |
//! | `facade` | `QueryFacade` and its four operations |
//! | `snapshot` | `DateSnapshot`, delta dial and heat/cold wave status |
//! | `ranged` | Range query result types |
//! | `species` | Thermal tolerance ranges and exposure counts |
//! | `batch` | Parallel replace-on-rerun anomaly persistence |
//! | `error` | Error types |

mod batch;
mod config;
mod error;
mod facade;
mod ranged;
mod snapshot;
mod species;

pub use batch::{
    AnomalyJob, IndicatorTypeIds, JobOutcome, JobReport, plan_anomaly_jobs, run_anomaly_batch,
};
pub use config::{DEFAULT_BASELINE_CUTOFF, QueryConfig};
pub use error::QueryError;
pub use facade::QueryFacade;
pub use ranged::{DatedBand, RangedQuantileBand, RangedRow, RangedSeries};
pub use snapshot::{DIAL_CENTER, DateSnapshot, WaveStatus};
pub use species::{ThermalExposure, ThermalRange, ThermalStatus};
