//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use mpa_calendar::year_end;

use mpa_climatology::{BaselinePolicy, LogicalSeriesKey, QuantileWindow, TimeseriesType};
use mpa_query::{IndicatorTypeIds, QueryConfig, ThermalRange};

use crate::config::*;

/// Parses a quantile window name.
pub fn parse_window(s: &str) -> Result<QuantileWindow> {
    match s.to_lowercase().as_str() {
        "full" => Ok(QuantileWindow::Full),
        "baseline_only" | "baseline" => Ok(QuantileWindow::BaselineOnly),
        other => bail!("unknown quantile window: {other:?}"),
    }
}

/// Parses a baseline shortfall policy name.
pub fn parse_policy(s: &str) -> Result<BaselinePolicy> {
    match s.to_lowercase().as_str() {
        "strict" => Ok(BaselinePolicy::Strict),
        "use_available" => Ok(BaselinePolicy::UseAvailable),
        other => bail!("unknown baseline policy: {other:?}"),
    }
}

/// Parses a timeseries type name.
pub fn parse_timeseries_type(s: &str) -> Result<TimeseriesType> {
    match s.to_lowercase().as_str() {
        "bottom" => Ok(TimeseriesType::Bottom),
        "surface" => Ok(TimeseriesType::Surface),
        other => bail!("unknown timeseries type: {other:?}"),
    }
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date: {s:?}"))
}

/// Parses a baseline cutoff: a full date, or a bare year meaning its
/// December 31.
pub fn parse_cutoff(s: &str) -> Result<NaiveDate> {
    match s.trim().parse::<i32>() {
        Ok(year) => year_end(year).with_context(|| format!("invalid baseline cutoff: {s:?}")),
        Err(_) => parse_date(s),
    }
}

/// Builds a [`QueryConfig`] from the engine and anomaly sections.
pub fn build_query_config(engine: &EngineToml, anomaly: &AnomalyToml) -> Result<QueryConfig> {
    let cfg = QueryConfig::new()
        .with_baseline_cutoff(parse_cutoff(&engine.baseline_cutoff)?)
        .with_central_quantile(engine.central_quantile)
        .with_snapshot_window(parse_window(&engine.snapshot_window)?)
        .with_range_window(parse_window(&engine.range_window)?)
        .with_baseline_year_count(anomaly.baseline_year_count)
        .with_baseline_policy(parse_policy(&anomaly.policy)?);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds the key of a `[[series]]` entry.
pub fn build_series_key(series: &SeriesToml) -> Result<LogicalSeriesKey> {
    let t = parse_timeseries_type(&series.timeseries_type)?;
    Ok(LogicalSeriesKey::new(series.zone, series.model, t, series.indicator)
        .with_depth(series.depth))
}

/// Builds the indicator type mapping of the batch job.
pub fn build_type_ids(batch: &BatchToml) -> Result<IndicatorTypeIds> {
    match (batch.bottom_indicator_type_id, batch.surface_indicator_type_id) {
        (Some(bottom), Some(surface)) => Ok(IndicatorTypeIds::new(bottom, surface)),
        _ => bail!(
            "batch needs both [batch].bottom_indicator_type_id and [batch].surface_indicator_type_id"
        ),
    }
}

/// Builds the named thermal ranges of the `[[species]]` entries.
pub fn build_species(species: &[SpeciesToml]) -> Result<Vec<(String, ThermalRange)>> {
    species
        .iter()
        .map(|s| {
            let range = ThermalRange::new(s.lower, s.upper)
                .with_context(|| format!("species {:?}", s.name))?;
            Ok((s.name.clone(), range))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_and_policies() {
        assert_eq!(parse_window("Full").unwrap(), QuantileWindow::Full);
        assert_eq!(parse_window("baseline_only").unwrap(), QuantileWindow::BaselineOnly);
        assert!(parse_window("rolling").is_err());
        assert_eq!(parse_policy("use_available").unwrap(), BaselinePolicy::UseAvailable);
        assert!(parse_policy("lenient").is_err());
    }

    #[test]
    fn cutoff_accepts_date_or_year() {
        let dec31 = NaiveDate::from_ymd_opt(2012, 12, 31).unwrap();
        assert_eq!(parse_cutoff("2012").unwrap(), dec31);
        assert_eq!(parse_cutoff("2012-12-31").unwrap(), dec31);
        assert_eq!(
            parse_cutoff("2012-06-30").unwrap(),
            NaiveDate::from_ymd_opt(2012, 6, 30).unwrap()
        );
        assert!(parse_cutoff("999999999").is_err());
        assert!(parse_cutoff("end of 2012").is_err());
    }

    #[test]
    fn default_sections_build_default_config() {
        let cfg = build_query_config(&EngineToml::default(), &AnomalyToml::default()).unwrap();
        assert_eq!(cfg.baseline_cutoff(), mpa_query::DEFAULT_BASELINE_CUTOFF);
        assert_eq!(cfg.snapshot_window(), QuantileWindow::BaselineOnly);
        assert_eq!(cfg.range_window(), QuantileWindow::Full);
    }

    #[test]
    fn invalid_central_quantile_rejected() {
        let engine = EngineToml {
            central_quantile: 1.2,
            ..EngineToml::default()
        };
        assert!(build_query_config(&engine, &AnomalyToml::default()).is_err());
    }

    #[test]
    fn type_ids_need_both() {
        let batch = BatchToml {
            bottom_indicator_type_id: Some(1),
            ..BatchToml::default()
        };
        assert!(build_type_ids(&batch).is_err());
    }
}
