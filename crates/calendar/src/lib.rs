//! # mpa-calendar
//!
//! Calendar keys used to group multi-year daily series into seasonal buckets.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDate"] -->|"DayOfYear::from_date()"| B["DayOfYear (month, day)"]
//!     B -->|".index()"| C["slot 0..366"]
//!     D["(start, end)"] -->|"DateRange::new()"| E["DateRange"]
//!     E -->|".contains()"| A
//!     F["year"] -->|"year_end()"| A
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use mpa_calendar::{DateRange, DayOfYear, year_end};
//!
//! let date = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
//! let doy = DayOfYear::from_date(date);
//! assert!(doy.is_leap_day());
//!
//! let range = DateRange::new(date, year_end(2020).unwrap()).unwrap();
//! assert!(range.contains(date));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | `(month, day)` bucket key over the 366-slot year |
//! | `range` | Inclusive date ranges and year boundaries |
//! | `error` | Error types |

mod doy;
mod error;
mod range;

pub use doy::DayOfYear;
pub use error::CalendarError;
pub use range::{DateRange, year_end};
