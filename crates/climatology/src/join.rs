//! Model/observation date join and error statistics.

use std::collections::HashMap;

use chrono::NaiveDate;
use mpa_calendar::DateRange;
use serde::Serialize;

use crate::series::{ObservationPoint, TimeSeriesPoint};

/// Observation attached to a joined row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObservationSummary {
    pub value: f64,
    pub count: u32,
    pub stddev: f64,
}

impl From<&ObservationPoint> for ObservationSummary {
    fn from(o: &ObservationPoint) -> Self {
        Self {
            value: o.value,
            count: o.sample_count,
            stddev: o.sample_stddev,
        }
    }
}

/// One model date, enriched with the observation of the same date if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JoinedRow {
    pub date: NaiveDate,
    pub value: f64,
    pub observation: Option<ObservationSummary>,
}

/// Model series left-joined with observations. The model defines the rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinedSeries {
    rows: Vec<JoinedRow>,
}

impl JoinedSeries {
    pub fn rows(&self) -> &[JoinedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows carrying an observation.
    pub fn n_observed(&self) -> usize {
        self.rows.iter().filter(|r| r.observation.is_some()).count()
    }

    /// Rows dated within `range`.
    pub fn within<'a>(&'a self, range: &'a DateRange) -> impl Iterator<Item = &'a JoinedRow> + 'a {
        self.rows.iter().filter(move |r| range.contains(r.date))
    }
}

/// Left-joins a model series with observations on exact date equality.
///
/// Model points without a same-date observation get `observation = None`;
/// observations without a model point are dropped.
pub fn join(model: &[TimeSeriesPoint], observations: &[ObservationPoint]) -> JoinedSeries {
    let by_date: HashMap<NaiveDate, &ObservationPoint> =
        observations.iter().map(|o| (o.date, o)).collect();

    let rows: Vec<JoinedRow> = model
        .iter()
        .map(|p| JoinedRow {
            date: p.date,
            value: p.value,
            observation: by_date.get(&p.date).map(|o| ObservationSummary::from(*o)),
        })
        .collect();

    tracing::debug!(
        n_rows = rows.len(),
        n_observations = observations.len(),
        "joined model and observation series"
    );

    JoinedSeries { rows }
}

/// Root-mean-square error between model and observed values over `range`.
///
/// Only rows where both the model value and the observed value are present
/// (finite) count. Returns `None` when no such row exists; sparse
/// observational coverage is expected and not an error.
pub fn compute_rmse(joined: &JoinedSeries, range: &DateRange) -> Option<f64> {
    mpa_stats::rmse(
        joined
            .within(range)
            .filter_map(|r| r.observation.map(|o| (r.value, o.value))),
    )
}
