//! Classical seasonal decomposition.
//!
//! Splits a series into trend, seasonal and residual components:
//! - Trend: centered moving average over one seasonal period
//! - Seasonal: per-phase average of the detrended series, normalised and tiled
//! - Residual: what remains after removing trend and seasonal
//!
//! Components combine additively (`y = T + S + R`) or multiplicatively
//! (`y = T * S * R`).

use crate::core::Series;
use crate::error::{AnalysisError, Result};
use crate::features::basic::{mean, negligible_spread, variance, variance_sample};
use std::fmt;
use std::str::FromStr;

/// Seasonal period for hourly data with a daily cycle.
pub const DEFAULT_PERIOD: usize = 24;

/// How the components combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecompositionMode {
    /// `y = trend + seasonal + residual`
    #[default]
    Additive,
    /// `y = trend * seasonal * residual`
    Multiplicative,
}

impl DecompositionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecompositionMode::Additive => "additive",
            DecompositionMode::Multiplicative => "multiplicative",
        }
    }
}

impl fmt::Display for DecompositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecompositionMode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "additive" | "add" => Ok(DecompositionMode::Additive),
            "multiplicative" | "mul" => Ok(DecompositionMode::Multiplicative),
            other => Err(AnalysisError::InvalidParameter(format!(
                "unknown decomposition mode '{}'",
                other
            ))),
        }
    }
}

/// Result of a classical decomposition.
///
/// All four component series share the input's index. `trend` and
/// `residual` are undefined (`NaN`) for the first and last `period / 2`
/// observations.
#[derive(Debug, Clone)]
pub struct DecompositionResult {
    observed: Series,
    trend: Series,
    seasonal: Series,
    residual: Series,
    seasonal_profile: Vec<f64>,
    mode: DecompositionMode,
    period: usize,
}

impl DecompositionResult {
    pub fn observed(&self) -> &Series {
        &self.observed
    }

    pub fn trend(&self) -> &Series {
        &self.trend
    }

    pub fn seasonal(&self) -> &Series {
        &self.seasonal
    }

    pub fn residual(&self) -> &Series {
        &self.residual
    }

    /// One period of the seasonal component; phase 0 is the first observation.
    pub fn seasonal_profile(&self) -> &[f64] {
        &self.seasonal_profile
    }

    pub fn mode(&self) -> DecompositionMode {
        self.mode
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Phase at which the seasonal profile peaks.
    pub fn peak_phase(&self) -> usize {
        argmax(&self.seasonal_profile)
    }

    /// Phase at which the seasonal profile bottoms out.
    pub fn trough_phase(&self) -> usize {
        let negated: Vec<f64> = self.seasonal_profile.iter().map(|v| -v).collect();
        argmax(&negated)
    }

    /// Sample standard deviation of the defined residuals.
    pub fn residual_std(&self) -> f64 {
        variance_sample(&self.residual.defined_values()).sqrt()
    }

    /// Get the seasonal strength (0 to 1).
    /// Values close to 1 indicate strong seasonality.
    pub fn seasonal_strength(&self) -> f64 {
        let (_, seasonal, residual) = self.additive_components();
        strength(&seasonal, &residual)
    }

    /// Get the trend strength (0 to 1).
    /// Values close to 1 indicate strong trend.
    pub fn trend_strength(&self) -> f64 {
        let (trend, _, residual) = self.additive_components();
        strength(&trend, &residual)
    }

    /// Components on an additive scale over the positions where trend is
    /// defined. Multiplicative components are log-transformed.
    fn additive_components(&self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let scale = |v: f64| match self.mode {
            DecompositionMode::Additive => v,
            DecompositionMode::Multiplicative => v.ln(),
        };

        let mut trend = Vec::new();
        let mut seasonal = Vec::new();
        let mut residual = Vec::new();
        for i in 0..self.trend.len() {
            if self.trend.is_defined(i) && self.residual.is_defined(i) {
                trend.push(scale(self.trend.values()[i]));
                seasonal.push(scale(self.seasonal.values()[i]));
                residual.push(scale(self.residual.values()[i]));
            }
        }
        (trend, seasonal, residual)
    }
}

/// `max(0, 1 - Var(R) / Var(C + R))`.
fn strength(component: &[f64], residual: &[f64]) -> f64 {
    let combined: Vec<f64> = component
        .iter()
        .zip(residual.iter())
        .map(|(c, r)| c + r)
        .collect();
    let var_combined = variance(&combined);

    let mean_square = mean(&combined.iter().map(|x| x * x).collect::<Vec<_>>());
    if var_combined.is_nan() || negligible_spread(var_combined, mean_square) {
        return 0.0;
    }

    (1.0 - variance(residual) / var_combined).max(0.0)
}

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_i, best), (i, &v)| {
            if v > best {
                (i, v)
            } else {
                (best_i, best)
            }
        })
        .0
}

/// Classical decomposition configuration and algorithm.
#[derive(Debug, Clone)]
pub struct ClassicalDecomposition {
    period: usize,
    mode: DecompositionMode,
}

impl Default for ClassicalDecomposition {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}

impl ClassicalDecomposition {
    /// Create an additive decomposer with the given seasonal period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            mode: DecompositionMode::Additive,
        }
    }

    pub fn with_mode(mut self, mode: DecompositionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn mode(&self) -> DecompositionMode {
        self.mode
    }

    /// Shortest series this decomposer accepts.
    pub fn min_len(&self) -> usize {
        2 * self.period
    }

    /// Decompose the series.
    pub fn decompose(&self, series: &Series) -> Result<DecompositionResult> {
        let period = self.period;
        if period < 2 {
            return Err(AnalysisError::InvalidParameter(format!(
                "seasonal period must be at least 2, got {}",
                period
            )));
        }

        let n = series.len();
        if n < self.min_len() {
            return Err(AnalysisError::InsufficientData {
                needed: self.min_len(),
                got: n,
            });
        }
        if series.has_undefined() {
            return Err(AnalysisError::MissingValues);
        }

        let observed = series.values();
        if self.mode == DecompositionMode::Multiplicative && observed.iter().any(|&v| v <= 0.0) {
            return Err(AnalysisError::InvalidMode(
                "multiplicative decomposition requires strictly positive values".to_string(),
            ));
        }

        // Step 1: Trend
        let trend = period_moving_average(observed, period);

        // Step 2: Detrending
        let detrended: Vec<f64> = observed
            .iter()
            .zip(trend.iter())
            .map(|(&y, &t)| match self.mode {
                DecompositionMode::Additive => y - t,
                DecompositionMode::Multiplicative => y / t,
            })
            .collect();

        // Step 3: Seasonal profile, normalised and tiled
        let seasonal_profile = self.seasonal_profile(&detrended);
        let seasonal: Vec<f64> = (0..n).map(|i| seasonal_profile[i % period]).collect();

        // Step 4: Residual
        let residual: Vec<f64> = observed
            .iter()
            .zip(trend.iter())
            .zip(seasonal.iter())
            .map(|((&y, &t), &s)| match self.mode {
                DecompositionMode::Additive => y - t - s,
                DecompositionMode::Multiplicative => y / (t * s),
            })
            .collect();

        Ok(DecompositionResult {
            observed: series.clone(),
            trend: series.with_values(trend)?,
            seasonal: series.with_values(seasonal)?,
            residual: series.with_values(residual)?,
            seasonal_profile,
            mode: self.mode,
            period,
        })
    }

    /// Average the detrended values per phase, ignoring undefined entries,
    /// then centre the profile on 0 (additive) or 1 (multiplicative).
    fn seasonal_profile(&self, detrended: &[f64]) -> Vec<f64> {
        let period = self.period;
        let mut profile: Vec<f64> = (0..period)
            .map(|phase| {
                let defined: Vec<f64> = detrended
                    .iter()
                    .skip(phase)
                    .step_by(period)
                    .copied()
                    .filter(|v| v.is_finite())
                    .collect();
                mean(&defined)
            })
            .collect();

        let level = mean(&profile);
        match self.mode {
            DecompositionMode::Additive => profile.iter_mut().for_each(|s| *s -= level),
            DecompositionMode::Multiplicative => profile.iter_mut().for_each(|s| *s /= level),
        }
        profile
    }
}

/// Decompose `series` with the given period and mode.
pub fn decompose(
    series: &Series,
    period: usize,
    mode: DecompositionMode,
) -> Result<DecompositionResult> {
    ClassicalDecomposition::new(period).with_mode(mode).decompose(series)
}

/// Centered moving average over one period.
///
/// Even periods use a 2×period average (weights `0.5, 1, …, 1, 0.5`) so the
/// window stays centred on the observation. The first and last `period / 2`
/// positions are undefined.
pub fn period_moving_average(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let half = period / 2;
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < 2 * half + 1 {
        return result;
    }

    let even = period % 2 == 0;
    for i in half..(n - half) {
        let window = &values[i - half..=i + half];
        let sum: f64 = if even {
            let inner: f64 = window[1..window.len() - 1].iter().sum();
            inner + 0.5 * (window[0] + window[window.len() - 1])
        } else {
            window.iter().sum()
        };
        result[i] = sum / period as f64;
    }

    result
}
