//! Simple moving average over a centered window.

use crate::core::Series;
use crate::error::{AnalysisError, Result};

/// Smallest window the smoother will use.
pub const MIN_WINDOW: usize = 2;

/// Default span of the trend view, in days.
pub const DEFAULT_TREND_DAYS: usize = 30;

/// What to emit where a centered window runs past the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Leave edge positions undefined (`NaN`).
    #[default]
    Undefined,
    /// Average the part of the window that lies inside the data.
    Shrink,
}

/// Output of the smoother: a series on the input's index.
#[derive(Debug, Clone)]
pub struct SmoothedSeries {
    series: Series,
    window: usize,
    requested: usize,
    edge_policy: EdgePolicy,
}

impl SmoothedSeries {
    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn values(&self) -> &[f64] {
        self.series.values()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Window actually applied, after clamping.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Window the caller asked for.
    pub fn requested_window(&self) -> usize {
        self.requested
    }

    pub fn was_clamped(&self) -> bool {
        self.window != self.requested
    }

    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge_policy
    }
}

/// Centered moving-average configuration.
#[derive(Debug, Clone)]
pub struct Smoother {
    window: usize,
    edge_policy: EdgePolicy,
}

impl Default for Smoother {
    fn default() -> Self {
        Self {
            window: MIN_WINDOW,
            edge_policy: EdgePolicy::Undefined,
        }
    }
}

impl Smoother {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            ..Default::default()
        }
    }

    pub fn with_edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.edge_policy = policy;
        self
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// The window that will be applied to a series of length `len`.
    ///
    /// Raised to [`MIN_WINDOW`], then capped at `len`.
    pub fn effective_window(&self, len: usize) -> usize {
        self.window.max(MIN_WINDOW).min(len)
    }

    /// Smooth `series`.
    ///
    /// Out-of-range windows are clamped rather than rejected; only an empty
    /// series is an error.
    pub fn smooth(&self, series: &Series) -> Result<SmoothedSeries> {
        if series.is_empty() {
            return Err(AnalysisError::InsufficientData { needed: 1, got: 0 });
        }

        let window = self.effective_window(series.len());
        if window != self.window {
            tracing::debug!(
                requested = self.window,
                applied = window,
                len = series.len(),
                "clamped smoothing window"
            );
        }

        let values = centered_mean(series.values(), window, self.edge_policy);
        Ok(SmoothedSeries {
            series: series.with_values(values)?,
            window,
            requested: self.window,
            edge_policy: self.edge_policy,
        })
    }
}

/// Smooth with a centered window of `window` points, edges undefined.
pub fn smooth(series: &Series, window: usize) -> Result<SmoothedSeries> {
    Smoother::new(window).smooth(series)
}

/// Long-window trend: a centered mean spanning `days` days of observations.
pub fn extract_trend(series: &Series, days: usize) -> Result<SmoothedSeries> {
    let per_day = series.frequency().per_day().ok_or_else(|| {
        AnalysisError::InvalidParameter("series frequency does not divide a day".to_string())
    })?;
    smooth(series, days.saturating_mul(per_day))
}

/// Centered rolling mean.
///
/// Position `i` averages `values[i - window/2 .. i - window/2 + window]`.
/// A window touching an undefined value yields an undefined result.
pub fn centered_mean(values: &[f64], window: usize, policy: EdgePolicy) -> Vec<f64> {
    let n = values.len();
    if n == 0 || window == 0 {
        return vec![f64::NAN; n];
    }

    // Prefix sums over defined values plus a running count of undefined ones.
    let mut sums = Vec::with_capacity(n + 1);
    let mut gaps = Vec::with_capacity(n + 1);
    sums.push(0.0);
    gaps.push(0usize);
    for &v in values {
        let (s, g) = (sums[sums.len() - 1], gaps[gaps.len() - 1]);
        if v.is_finite() {
            sums.push(s + v);
            gaps.push(g);
        } else {
            sums.push(s);
            gaps.push(g + 1);
        }
    }

    let half = window / 2;
    let mut result = vec![f64::NAN; n];

    for i in 0..n {
        let inside = i >= half && i + window - half <= n;
        if !inside && policy == EdgePolicy::Undefined {
            continue;
        }

        let start = i.saturating_sub(half);
        let end = (i + window - half).min(n);
        if end <= start || gaps[end] - gaps[start] > 0 {
            continue;
        }
        result[i] = (sums[end] - sums[start]) / (end - start) as f64;
    }

    result
}
