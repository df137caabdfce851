//! Selected-date snapshot and its display classifications.

use chrono::NaiveDate;
use mpa_climatology::ObservationSummary;
use serde::Serialize;

/// Dial position reported when no meaningful position exists.
pub const DIAL_CENTER: f64 = 50.0;

/// Every figure shown for one selected date of one series.
///
/// Fields are `None` when not derivable: `value` when the date has no
/// (finite) point, climatology fields when the date's bucket has no
/// baseline data, deltas when an extreme of the series falls in such a
/// bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DateSnapshot {
    pub date: NaiveDate,
    pub value: Option<f64>,
    pub climatology: Option<f64>,
    pub stddev: Option<f64>,
    pub observation: Option<ObservationSummary>,
    pub lower_quantile: Option<f64>,
    pub upper_quantile: Option<f64>,
    pub min_delta: Option<f64>,
    pub max_delta: Option<f64>,
}

/// Position of a value relative to its day's quantile band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveStatus {
    /// Above the upper quantile.
    MarineHeatWave,
    /// Below the lower quantile.
    MarineColdWave,
    Normal,
}

impl DateSnapshot {
    /// `value - climatology`, when both are known.
    pub fn delta(&self) -> Option<f64> {
        Some(self.value? - self.climatology?)
    }

    /// Places [`delta`](Self::delta) within `[min_delta, max_delta]` as a
    /// percentage clamped to `[0, 100]`.
    ///
    /// Returns [`DIAL_CENTER`] if the delta or either bound is unknown, or if
    /// the bounds have zero width.
    pub fn dial_position(&self) -> f64 {
        let (Some(delta), Some(min), Some(max)) = (self.delta(), self.min_delta, self.max_delta)
        else {
            return DIAL_CENTER;
        };
        let width = max - min;
        if !(width.is_finite() && width > 0.0) {
            return DIAL_CENTER;
        }
        ((delta - min) / width * 100.0).clamp(0.0, 100.0)
    }

    /// Classifies the value against the day's quantile band.
    ///
    /// Returns `None` when the value or the band is unknown.
    pub fn wave_status(&self) -> Option<WaveStatus> {
        let value = self.value?;
        let (lower, upper) = (self.lower_quantile?, self.upper_quantile?);
        Some(if value > upper {
            WaveStatus::MarineHeatWave
        } else if value < lower {
            WaveStatus::MarineColdWave
        } else {
            WaveStatus::Normal
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn snapshot(value: Option<f64>) -> DateSnapshot {
        DateSnapshot {
            date: NaiveDate::from_ymd_opt(2021, 6, 15).unwrap(),
            value,
            climatology: Some(14.0),
            stddev: Some(1.0),
            observation: None,
            lower_quantile: Some(12.0),
            upper_quantile: Some(16.0),
            min_delta: Some(-4.0),
            max_delta: Some(6.0),
        }
    }

    #[test]
    fn delta_and_dial() {
        let s = snapshot(Some(15.0));
        assert_relative_eq!(s.delta().unwrap(), 1.0);
        // (1 - (-4)) / 10 * 100
        assert_relative_eq!(s.dial_position(), 50.0);
        let s = snapshot(Some(19.0));
        assert_relative_eq!(s.dial_position(), 90.0);
    }

    #[test]
    fn dial_is_clamped() {
        assert_relative_eq!(snapshot(Some(40.0)).dial_position(), 100.0);
        assert_relative_eq!(snapshot(Some(0.0)).dial_position(), 0.0);
    }

    #[test]
    fn dial_centers_without_data() {
        assert_eq!(snapshot(None).dial_position(), DIAL_CENTER);
        let mut s = snapshot(Some(15.0));
        s.max_delta = Some(-4.0);
        assert_eq!(s.dial_position(), DIAL_CENTER);
        s.max_delta = None;
        assert_eq!(s.dial_position(), DIAL_CENTER);
    }

    #[test]
    fn wave_classification() {
        assert_eq!(snapshot(Some(17.0)).wave_status(), Some(WaveStatus::MarineHeatWave));
        assert_eq!(snapshot(Some(11.0)).wave_status(), Some(WaveStatus::MarineColdWave));
        assert_eq!(snapshot(Some(16.0)).wave_status(), Some(WaveStatus::Normal));
        assert_eq!(snapshot(None).wave_status(), None);
    }
}
