//! Sample autocorrelation over a bounded lag range.
//!
//! Every lag is normalised by the mean and variance of the whole series, not
//! of the overlapping segment. Undefined (`NaN`) values are left out of the
//! mean, the variance and every lagged product.

use crate::core::Series;
use crate::error::{AnalysisError, Result};
use crate::features::basic::negligible_spread;
use statrs::distribution::{ContinuousCDF, Normal};

/// Number of lags examined by default (two days of hourly data).
pub const DEFAULT_MAX_LAG: usize = 48;

/// Autocorrelation at lags `0..=max_lag`.
#[derive(Debug, Clone)]
pub struct AutocorrelationProfile {
    correlations: Vec<f64>,
    samples: usize,
}

impl AutocorrelationProfile {
    /// (lag, correlation) pairs in lag order.
    pub fn lags(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.correlations.iter().copied().enumerate()
    }

    /// Correlations indexed by lag.
    pub fn correlations(&self) -> &[f64] {
        &self.correlations
    }

    pub fn correlation_at(&self, lag: usize) -> Option<f64> {
        self.correlations.get(lag).copied()
    }

    pub fn max_lag(&self) -> usize {
        self.correlations.len().saturating_sub(1)
    }

    /// Number of lags, including lag 0.
    pub fn len(&self) -> usize {
        self.correlations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.correlations.is_empty()
    }

    /// Count of defined observations the profile was computed from.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Half-width of the confidence band around zero at each lag.
    ///
    /// Uses Bartlett's formula: `z * sqrt((1 + 2 * sum_{j<k} r_j^2) / n)`.
    /// The band at lag 0 is zero.
    pub fn confidence_bounds(&self, level: f64) -> Result<Vec<f64>> {
        if !(level > 0.0 && level < 1.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "confidence level must lie in (0, 1), got {}",
                level
            )));
        }

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| AnalysisError::InvalidParameter(e.to_string()))?;
        let z = normal.inverse_cdf(0.5 + level / 2.0);
        let n = self.samples as f64;

        let mut bounds = Vec::with_capacity(self.correlations.len());
        let mut cumulative = 0.0;
        for (lag, &r) in self.correlations.iter().enumerate() {
            if lag == 0 {
                bounds.push(0.0);
                continue;
            }
            bounds.push(z * ((1.0 + 2.0 * cumulative) / n).sqrt());
            cumulative += r * r;
        }

        Ok(bounds)
    }

    /// Lags (excluding 0) whose correlation falls outside the confidence band.
    pub fn significant_lags(&self, level: f64) -> Result<Vec<usize>> {
        let bounds = self.confidence_bounds(level)?;
        Ok(self
            .lags()
            .skip(1)
            .filter(|&(lag, r)| r.abs() > bounds[lag])
            .map(|(lag, _)| lag)
            .collect())
    }
}

/// Compute the autocorrelation profile of `series` up to `max_lag`.
pub fn acf(series: &Series, max_lag: usize) -> Result<AutocorrelationProfile> {
    let values = series.values();
    let samples = series.defined_count();
    if samples < 2 {
        return Err(AnalysisError::InsufficientData {
            needed: 2,
            got: samples,
        });
    }
    if max_lag >= values.len() {
        return Err(AnalysisError::InsufficientData {
            needed: max_lag + 1,
            got: values.len(),
        });
    }

    let m = values.iter().filter(|v| v.is_finite()).sum::<f64>() / samples as f64;
    let denominator: f64 = values
        .iter()
        .filter(|v| v.is_finite())
        .map(|x| (x - m).powi(2))
        .sum();

    let energy: f64 = values.iter().filter(|v| v.is_finite()).map(|x| x * x).sum();

    let mut correlations = Vec::with_capacity(max_lag + 1);
    correlations.push(1.0);
    for lag in 1..=max_lag {
        let r = if negligible_spread(denominator, energy) {
            0.0
        } else {
            lagged_cross_product(values, m, lag) / denominator
        };
        correlations.push(r.clamp(-1.0, 1.0));
    }

    Ok(AutocorrelationProfile {
        correlations,
        samples,
    })
}

/// Returns the autocorrelation at a specific lag.
///
/// Undefined values are skipped. Returns `NaN` if fewer than `lag + 1`
/// values are available, and 0.0 for a constant series.
///
/// # Arguments
/// * `series` - Input time series
/// * `lag` - Lag value
pub fn autocorrelation(series: &[f64], lag: usize) -> f64 {
    if series.len() <= lag {
        return f64::NAN;
    }

    let defined: Vec<f64> = series.iter().copied().filter(|v| v.is_finite()).collect();
    if defined.is_empty() {
        return f64::NAN;
    }
    if lag == 0 {
        return 1.0;
    }

    let m = defined.iter().sum::<f64>() / defined.len() as f64;
    let denominator: f64 = defined.iter().map(|x| (x - m).powi(2)).sum();
    let energy: f64 = defined.iter().map(|x| x * x).sum();

    if negligible_spread(denominator, energy) {
        return 0.0;
    }

    lagged_cross_product(series, m, lag) / denominator
}

/// `sum (x[i] - m) * (x[i - lag] - m)` over pairs where both ends are defined.
fn lagged_cross_product(values: &[f64], m: f64, lag: usize) -> f64 {
    values
        .iter()
        .skip(lag)
        .zip(values.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (a - m) * (b - m))
        .sum()
}
