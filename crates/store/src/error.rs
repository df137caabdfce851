//! Error types for mpa-store.

use std::path::PathBuf;

/// Error type for all fallible operations in the mpa-store crate.
///
/// Covers rejected inserts (ordering and observation invariants), CSV read
/// failures, and lock poisoning in the in-memory backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV reader.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// File being read.
        path: PathBuf,
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when a CSV field cannot be parsed into its column type.
    #[error("{}:{line}: invalid {column} '{raw}'", path.display())]
    Parse {
        /// File being read.
        path: PathBuf,
        /// One-based line number of the offending record.
        line: u64,
        /// Column name.
        column: &'static str,
        /// Raw field text.
        raw: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a backend lock was poisoned by a panicking writer.
    #[error("{what} lock poisoned")]
    Poisoned {
        /// Which structure's lock failed.
        what: &'static str,
    },
}
