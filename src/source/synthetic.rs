//! Synthetic hourly load generator.
//!
//! Produces a demonstration series built from a base level, a linear ramp, a
//! daily profile made of two phase-shifted sinusoids, a weekend dip and
//! Gaussian noise.

use super::DataSource;
use crate::core::{regular_index, Frequency, Series};
use crate::error::{AnalysisError, Result};
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// Configuration of the synthetic load generator.
#[derive(Debug, Clone)]
pub struct SyntheticLoad {
    days: usize,
    /// First timestamp; 2025-01-01 00:00 UTC (a Wednesday) when unset.
    start: Option<DateTime<Utc>>,
    base_level: f64,
    trend_max: f64,
    daily_amplitude: f64,
    /// Hour offsets of the two daily sinusoids.
    daily_phases: (f64, f64),
    weekend_offset: f64,
    noise_std: f64,
    /// Random seed for reproducibility (None for random).
    seed: Option<u64>,
}

impl Default for SyntheticLoad {
    fn default() -> Self {
        Self {
            days: 60,
            start: None,
            base_level: 500.0,
            trend_max: 50.0,
            daily_amplitude: 100.0,
            daily_phases: (3.0, 8.0),
            weekend_offset: 70.0,
            noise_std: 15.0,
            seed: None,
        }
    }
}

impl SyntheticLoad {
    /// Generator covering `days` days of hourly data.
    pub fn new(days: usize) -> Self {
        Self {
            days,
            ..Default::default()
        }
    }

    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_base_level(mut self, base_level: f64) -> Self {
        self.base_level = base_level;
        self
    }

    /// Value the linear ramp reaches at the last observation.
    pub fn with_trend_max(mut self, trend_max: f64) -> Self {
        self.trend_max = trend_max;
        self
    }

    pub fn with_daily_amplitude(mut self, amplitude: f64) -> Self {
        self.daily_amplitude = amplitude;
        self
    }

    pub fn with_daily_phases(mut self, first: f64, second: f64) -> Self {
        self.daily_phases = (first, second);
        self
    }

    /// Amount subtracted on Saturdays and Sundays.
    pub fn with_weekend_offset(mut self, offset: f64) -> Self {
        self.weekend_offset = offset;
        self
    }

    pub fn with_noise_std(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn noise_std(&self) -> f64 {
        self.noise_std
    }

    /// Number of hourly points produced.
    pub fn len(&self) -> usize {
        self.days * 24
    }

    pub fn is_empty(&self) -> bool {
        self.days == 0
    }

    /// The noise-free part of the series.
    pub fn deterministic_series(&self) -> Result<Series> {
        let timestamps = self.index()?;
        let n = timestamps.len();
        let values = timestamps
            .iter()
            .enumerate()
            .map(|(i, ts)| self.deterministic_component(i, n, ts))
            .collect();
        self.assemble(timestamps, values)
    }

    /// Generate using the configured seed, or a thread RNG when unseeded.
    pub fn generate(&self) -> Result<Series> {
        match self.seed {
            Some(seed) => self.generate_with_rng(&mut StdRng::seed_from_u64(seed)),
            None => self.generate_with_rng(&mut rand::thread_rng()),
        }
    }

    /// Generate drawing the noise term from `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Series> {
        let noise = Normal::new(0.0, self.noise_std).map_err(|e| {
            AnalysisError::InvalidParameter(format!("noise standard deviation: {}", e))
        })?;

        let timestamps = self.index()?;
        let n = timestamps.len();
        let values = timestamps
            .iter()
            .enumerate()
            .map(|(i, ts)| self.deterministic_component(i, n, ts) + noise.sample(rng))
            .collect();

        let series = self.assemble(timestamps, values)?;
        tracing::info!(days = self.days, points = series.len(), "generated synthetic load");
        Ok(series)
    }

    fn index(&self) -> Result<Vec<DateTime<Utc>>> {
        if self.days == 0 {
            return Err(AnalysisError::InvalidParameter(
                "days must be at least 1".to_string(),
            ));
        }
        let start = match self.start {
            Some(start) => start,
            None => Utc
                .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
                .single()
                .ok_or_else(|| {
                    AnalysisError::TimestampError("invalid default start".to_string())
                })?,
        };
        Ok(regular_index(start, Frequency::Hourly, self.len()))
    }

    fn assemble(&self, timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Series> {
        Ok(Series::from_pairs(timestamps.into_iter().zip(values), Frequency::Hourly)?
            .with_name("load_mw"))
    }

    fn deterministic_component(&self, i: usize, n: usize, ts: &DateTime<Utc>) -> f64 {
        // Ramp spans both endpoints: 0 at the first point, trend_max at the last.
        let trend = if n > 1 {
            self.trend_max * i as f64 / (n - 1) as f64
        } else {
            0.0
        };

        let hour = ts.hour() as f64;
        let omega = 2.0 * PI / 24.0;
        let daily = self.daily_amplitude
            * (((hour - self.daily_phases.0) * omega).sin()
                + ((hour - self.daily_phases.1) * omega).sin());

        let weekend = if ts.weekday().num_days_from_monday() >= 5 {
            -self.weekend_offset
        } else {
            0.0
        };

        self.base_level + trend + daily + weekend
    }
}

impl DataSource for SyntheticLoad {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn load(&self) -> Result<Series> {
        self.generate()
    }
}
