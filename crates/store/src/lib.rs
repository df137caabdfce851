//! # mpa-store
//!
//! Interfaces between the analytics engine and wherever series live: the
//! [`SeriesStore`] read side, the [`AnomalySink`] write side for persisted
//! annual anomalies, in-memory implementations of both, and CSV readers
//! that feed the in-memory store.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `series_store` | `SeriesStore` trait and `InMemorySeriesStore` |
//! | `sink` | `AnomalySink` trait, `IndicatorTarget`, `InMemoryAnomalySink` |
//! | `csv_read` | `date,value` and `date,value,count,std` readers |
//! | `validate` | Accumulated ordering / sample-count checks |
//! | `error` | Error types |

mod csv_read;
mod error;
mod series_store;
mod sink;
mod validate;

pub use csv_read::{read_observations_csv, read_series_csv};
pub use error::StoreError;
pub use series_store::{InMemorySeriesStore, SeriesStore};
pub use sink::{AnomalyRow, AnomalySink, InMemoryAnomalySink, IndicatorTarget};
