//! Caller-facing analysis settings.

use crate::features::DEFAULT_MAX_LAG;
use crate::seasonality::{DecompositionMode, DEFAULT_PERIOD};
use crate::smoothing::{EdgePolicy, DEFAULT_TREND_DAYS, MIN_WINDOW};

/// Settings shared by every view of an analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// How decomposition components combine.
    pub mode: DecompositionMode,
    /// Smoothing window in observations; clamped to `[2, len]` when applied.
    pub window: usize,
    /// Largest autocorrelation lag.
    pub max_lag: usize,
    /// Seasonal period in observations.
    pub period: usize,
    /// Span of the trend moving average, in days.
    pub trend_days: usize,
    /// Leading days of the series passed to the decomposition.
    pub decomposition_days: usize,
    /// Leading days of the series passed to the smoother.
    pub smoothing_days: usize,
    pub edge_policy: EdgePolicy,
    /// Level of the autocorrelation confidence band.
    pub confidence_level: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: DecompositionMode::Additive,
            window: MIN_WINDOW,
            max_lag: DEFAULT_MAX_LAG,
            period: DEFAULT_PERIOD,
            trend_days: DEFAULT_TREND_DAYS,
            decomposition_days: 30,
            smoothing_days: 7,
            edge_policy: EdgePolicy::Undefined,
            confidence_level: 0.95,
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: DecompositionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_max_lag(mut self, max_lag: usize) -> Self {
        self.max_lag = max_lag;
        self
    }

    pub fn with_period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    pub fn with_trend_days(mut self, days: usize) -> Self {
        self.trend_days = days;
        self
    }

    pub fn with_decomposition_days(mut self, days: usize) -> Self {
        self.decomposition_days = days;
        self
    }

    pub fn with_smoothing_days(mut self, days: usize) -> Self {
        self.smoothing_days = days;
        self
    }

    pub fn with_edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.edge_policy = policy;
        self
    }

    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }
}
