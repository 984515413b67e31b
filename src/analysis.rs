//! Runs every analysis view over one series.
//!
//! Each view is computed independently and keeps its own `Result`, so a
//! series too short to decompose still yields its autocorrelation, trend and
//! smoothing views. The per-view functions are public so a caller can
//! recompute a single view when one setting changes.

use crate::config::AnalysisConfig;
use crate::core::Series;
use crate::error::{AnalysisError, Result};
use crate::features::{acf, AutocorrelationProfile};
use crate::seasonality::{ClassicalDecomposition, DecompositionResult};
use crate::smoothing::{extract_trend, SmoothedSeries, Smoother};
use std::time::Instant;

/// Results of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Length of the analysed series.
    pub observed_len: usize,
    pub autocorrelation: Result<AutocorrelationProfile>,
    pub decomposition: Result<DecompositionResult>,
    pub trend: Result<SmoothedSeries>,
    pub smoothing: Result<SmoothedSeries>,
}

impl AnalysisReport {
    /// Views that failed, with their errors.
    pub fn errors(&self) -> Vec<(&'static str, &AnalysisError)> {
        let mut errors = Vec::new();
        if let Err(e) = &self.autocorrelation {
            errors.push(("autocorrelation", e));
        }
        if let Err(e) = &self.decomposition {
            errors.push(("decomposition", e));
        }
        if let Err(e) = &self.trend {
            errors.push(("trend", e));
        }
        if let Err(e) = &self.smoothing {
            errors.push(("smoothing", e));
        }
        errors
    }

    pub fn is_complete(&self) -> bool {
        self.errors().is_empty()
    }
}

/// Compute all views of `series`.
pub fn analyze(series: &Series, config: &AnalysisConfig) -> AnalysisReport {
    let report = AnalysisReport {
        observed_len: series.len(),
        autocorrelation: timed("autocorrelation", || autocorrelation_view(series, config)),
        decomposition: timed("decomposition", || decomposition_view(series, config)),
        trend: timed("trend", || trend_view(series, config)),
        smoothing: timed("smoothing", || smoothing_view(series, config)),
    };

    for (view, err) in report.errors() {
        tracing::warn!(view, error = %err, "analysis view failed");
    }
    report
}

/// Autocorrelation of the whole series.
pub fn autocorrelation_view(
    series: &Series,
    config: &AnalysisConfig,
) -> Result<AutocorrelationProfile> {
    acf(series, config.max_lag)
}

/// Decomposition of the leading `decomposition_days` of the series.
pub fn decomposition_view(series: &Series, config: &AnalysisConfig) -> Result<DecompositionResult> {
    let sample = leading_days(series, config.decomposition_days)?;
    ClassicalDecomposition::new(config.period)
        .with_mode(config.mode)
        .decompose(&sample)
}

/// Long-window trend of the whole series.
pub fn trend_view(series: &Series, config: &AnalysisConfig) -> Result<SmoothedSeries> {
    extract_trend(series, config.trend_days)
}

/// Smoothing of the leading `smoothing_days` of the series.
pub fn smoothing_view(series: &Series, config: &AnalysisConfig) -> Result<SmoothedSeries> {
    let sample = leading_days(series, config.smoothing_days)?;
    Smoother::new(config.window)
        .with_edge_policy(config.edge_policy)
        .smooth(&sample)
}

fn leading_days(series: &Series, days: usize) -> Result<Series> {
    let per_day = series.frequency().per_day().ok_or_else(|| {
        AnalysisError::InvalidParameter("series frequency does not divide a day".to_string())
    })?;
    Ok(series.head(days.saturating_mul(per_day)))
}

fn timed<T>(view: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let started = Instant::now();
    let result = f();
    tracing::debug!(
        view,
        ok = result.is_ok(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "computed analysis view"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seasonality::DecompositionMode;
    use crate::source::SyntheticLoad;

    #[test]
    fn analyze_produces_every_view() {
        let series = SyntheticLoad::new(60).with_seed(11).generate().unwrap();
        let report = analyze(&series, &AnalysisConfig::default());

        assert!(report.is_complete());
        assert_eq!(report.observed_len, 1440);
        assert_eq!(report.autocorrelation.as_ref().unwrap().max_lag(), 48);
        assert_eq!(report.decomposition.as_ref().unwrap().observed().len(), 720);
        assert_eq!(report.trend.as_ref().unwrap().window(), 720);
        assert_eq!(report.trend.as_ref().unwrap().len(), 1440);
        assert_eq!(report.smoothing.as_ref().unwrap().len(), 168);
        assert_eq!(report.smoothing.as_ref().unwrap().window(), 2);
    }

    #[test]
    fn analyze_isolates_failing_views() {
        // 47 points: too short to decompose, still fine for the other views
        let series = SyntheticLoad::new(2).with_seed(3).generate().unwrap().head(47);
        let config = AnalysisConfig::default().with_max_lag(24);
        let report = analyze(&series, &config);

        assert!(!report.is_complete());
        let errors = report.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "decomposition");
        assert_eq!(
            *errors[0].1,
            AnalysisError::InsufficientData { needed: 48, got: 47 }
        );
        assert!(report.autocorrelation.is_ok());
        assert!(report.trend.is_ok());
        assert!(report.smoothing.is_ok());
    }

    #[test]
    fn views_follow_config_changes() {
        let series = SyntheticLoad::new(10).with_seed(5).generate().unwrap();

        let config = AnalysisConfig::default().with_window(72);
        assert_eq!(smoothing_view(&series, &config).unwrap().window(), 72);
        let config = config.with_window(500);
        assert_eq!(smoothing_view(&series, &config).unwrap().window(), 168);

        let config = config.with_mode(DecompositionMode::Multiplicative);
        let result = decomposition_view(&series, &config).unwrap();
        assert_eq!(result.mode(), DecompositionMode::Multiplicative);
        assert_eq!(result.observed().len(), 240);
    }

    #[test]
    fn multiplicative_view_surfaces_invalid_mode() {
        let series = SyntheticLoad::new(3)
            .with_base_level(0.0)
            .with_seed(2)
            .generate()
            .unwrap();
        let config = AnalysisConfig::default().with_mode(DecompositionMode::Multiplicative);

        let report = analyze(&series, &config);
        assert!(matches!(
            report.decomposition,
            Err(AnalysisError::InvalidMode(_))
        ));
        assert!(report.autocorrelation.is_ok());
    }
}
