//! Persistence interface for annual anomaly indicators.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::error::StoreError;

/// Destination of one persisted annual-anomaly indicator series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct IndicatorTarget {
    pub zone_id: i64,
    pub model_id: i64,
    pub indicator_type_id: i64,
}

impl IndicatorTarget {
    pub fn new(zone_id: i64, model_id: i64, indicator_type_id: i64) -> Self {
        Self {
            zone_id,
            model_id,
            indicator_type_id,
        }
    }
}

impl fmt::Display for IndicatorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "zone={} model={} indicator_type={}",
            self.zone_id, self.model_id, self.indicator_type_id
        )
    }
}

/// One persisted indicator row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyRow {
    pub target: IndicatorTarget,
    pub year: i32,
    pub value: f64,
}

/// Write side of the batch anomaly job.
///
/// Rows are disjoint by `(target, year)`, so concurrent writers for
/// different targets never contend on the same row.
pub trait AnomalySink: Send + Sync {
    /// Removes every row of `target`. Returns the number of rows removed.
    fn delete_annual_anomalies(&self, target: &IndicatorTarget) -> Result<usize, StoreError>;

    /// Inserts or replaces the row for `(target, year)`.
    fn upsert_annual_anomaly(
        &self,
        target: &IndicatorTarget,
        year: i32,
        value: f64,
    ) -> Result<(), StoreError>;
}

impl<T: AnomalySink + ?Sized> AnomalySink for &T {
    fn delete_annual_anomalies(&self, target: &IndicatorTarget) -> Result<usize, StoreError> {
        (**self).delete_annual_anomalies(target)
    }

    fn upsert_annual_anomaly(
        &self,
        target: &IndicatorTarget,
        year: i32,
        value: f64,
    ) -> Result<(), StoreError> {
        (**self).upsert_annual_anomaly(target, year, value)
    }
}

impl<T: AnomalySink + ?Sized> AnomalySink for Arc<T> {
    fn delete_annual_anomalies(&self, target: &IndicatorTarget) -> Result<usize, StoreError> {
        (**self).delete_annual_anomalies(target)
    }

    fn upsert_annual_anomaly(
        &self,
        target: &IndicatorTarget,
        year: i32,
        value: f64,
    ) -> Result<(), StoreError> {
        (**self).upsert_annual_anomaly(target, year, value)
    }
}

/// [`AnomalySink`] keeping rows in a mutex-guarded ordered map.
#[derive(Debug, Default)]
pub struct InMemoryAnomalySink {
    rows: Mutex<BTreeMap<(IndicatorTarget, i32), f64>>,
}

impl InMemoryAnomalySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored row, ordered by target then year.
    pub fn rows(&self) -> Result<Vec<AnomalyRow>, StoreError> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Poisoned {
                what: "anomaly sink",
            })?;
        Ok(rows
            .iter()
            .map(|(&(target, year), &value)| AnomalyRow {
                target,
                year,
                value,
            })
            .collect())
    }

    /// Rows of a single target, ordered by year.
    pub fn rows_for(&self, target: &IndicatorTarget) -> Result<Vec<AnomalyRow>, StoreError> {
        Ok(self
            .rows()?
            .into_iter()
            .filter(|r| r.target == *target)
            .collect())
    }
}

impl AnomalySink for InMemoryAnomalySink {
    fn delete_annual_anomalies(&self, target: &IndicatorTarget) -> Result<usize, StoreError> {
        let mut rows = self.rows.lock().map_err(|_| StoreError::Poisoned {
            what: "anomaly sink",
        })?;
        let before = rows.len();
        rows.retain(|(t, _), _| t != target);
        Ok(before - rows.len())
    }

    fn upsert_annual_anomaly(
        &self,
        target: &IndicatorTarget,
        year: i32,
        value: f64,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().map_err(|_| StoreError::Poisoned {
            what: "anomaly sink",
        })?;
        rows.insert((*target, year), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_same_year() {
        let sink = InMemoryAnomalySink::new();
        let t = IndicatorTarget::new(62, 1, 7);
        sink.upsert_annual_anomaly(&t, 2020, 0.5).unwrap();
        sink.upsert_annual_anomaly(&t, 2020, -0.5).unwrap();
        let rows = sink.rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, -0.5);
    }

    #[test]
    fn delete_only_touches_its_target() {
        let sink = InMemoryAnomalySink::new();
        let a = IndicatorTarget::new(62, 1, 7);
        let b = IndicatorTarget::new(63, 1, 7);
        sink.upsert_annual_anomaly(&a, 2020, 1.0).unwrap();
        sink.upsert_annual_anomaly(&a, 2021, 2.0).unwrap();
        sink.upsert_annual_anomaly(&b, 2020, 3.0).unwrap();

        assert_eq!(sink.delete_annual_anomalies(&a).unwrap(), 2);
        assert!(sink.rows_for(&a).unwrap().is_empty());
        assert_eq!(sink.rows_for(&b).unwrap().len(), 1);
        assert_eq!(sink.delete_annual_anomalies(&a).unwrap(), 0);
    }

    #[test]
    fn target_display() {
        let t = IndicatorTarget::new(62, 1, 7);
        assert_eq!(t.to_string(), "zone=62 model=1 indicator_type=7");
    }
}
