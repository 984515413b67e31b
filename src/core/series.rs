//! Series data structure for regularly spaced temporal data.

use crate::error::{AnalysisError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Sampling frequency of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frequency {
    /// One observation per hour.
    #[default]
    Hourly,
    /// Arbitrary fixed spacing in seconds.
    Seconds(i64),
}

impl Frequency {
    /// Spacing between consecutive observations.
    pub fn duration(&self) -> Duration {
        match self {
            Frequency::Hourly => Duration::hours(1),
            Frequency::Seconds(s) => Duration::seconds(*s),
        }
    }

    /// Number of observations in one day, if the spacing divides a day evenly.
    pub fn per_day(&self) -> Option<usize> {
        let secs = self.duration().num_seconds();
        if secs > 0 && 86_400 % secs == 0 {
            Some((86_400 / secs) as usize)
        } else {
            None
        }
    }
}

/// A regularly spaced univariate series.
///
/// Series built from raw data never contain missing values: gaps are
/// materialised on the frequency grid and forward-filled. Series derived by
/// the analysis components may hold `NaN` where a value is undefined (for
/// example the edges of a centered moving average).
#[derive(Debug, Clone)]
pub struct Series {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
    name: Option<String>,
    frequency: Frequency,
}

/// Builder for constructing a [`Series`].
#[derive(Debug, Clone, Default)]
pub struct SeriesBuilder {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
    start: Option<DateTime<Utc>>,
    name: Option<String>,
    frequency: Frequency,
}

impl SeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit timestamps, paired positionally with [`values`](Self::values).
    pub fn timestamps(mut self, timestamps: Vec<DateTime<Utc>>) -> Self {
        self.timestamps = timestamps;
        self
    }

    pub fn values(mut self, values: Vec<f64>) -> Self {
        self.values = values;
        self
    }

    /// First timestamp of a regular index. Ignored when explicit timestamps are set.
    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn build(self) -> Result<Series> {
        let timestamps = if !self.timestamps.is_empty() {
            if self.timestamps.len() != self.values.len() {
                return Err(AnalysisError::DimensionMismatch {
                    expected: self.timestamps.len(),
                    got: self.values.len(),
                });
            }
            self.timestamps
        } else {
            let start = self.start.ok_or_else(|| {
                AnalysisError::InvalidParameter(
                    "either timestamps or a start instant is required".to_string(),
                )
            })?;
            regular_index(start, self.frequency, self.values.len())
        };

        let mut series = Series::from_pairs(
            timestamps.into_iter().zip(self.values),
            self.frequency,
        )?;
        series.name = self.name;
        Ok(series)
    }
}

impl Series {
    /// Build a series from raw (timestamp, value) pairs.
    ///
    /// Timestamps must be strictly increasing and lie on the frequency grid
    /// anchored at the first valid observation. Missing grid slots are
    /// inserted, and they and any NaN/infinite values are filled with the
    /// last valid value. Leading missing values are dropped.
    pub fn from_pairs<I>(pairs: I, frequency: Frequency) -> Result<Self>
    where
        I: IntoIterator<Item = (DateTime<Utc>, f64)>,
    {
        let pairs: Vec<(DateTime<Utc>, f64)> = pairs.into_iter().collect();
        if pairs.is_empty() {
            return Err(AnalysisError::DataUnavailable(
                "source contains no observations".to_string(),
            ));
        }

        for w in pairs.windows(2) {
            if w[1].0 <= w[0].0 {
                return Err(AnalysisError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        let first_valid = pairs
            .iter()
            .position(|(_, v)| v.is_finite())
            .ok_or_else(|| {
                AnalysisError::DataUnavailable("source contains no valid values".to_string())
            })?;

        let step = frequency.duration();
        let step_ns = step.num_nanoseconds().unwrap_or(0);
        if step_ns <= 0 {
            return Err(AnalysisError::InvalidParameter(
                "frequency must be positive".to_string(),
            ));
        }

        let origin = pairs[first_valid].0;
        let mut timestamps = Vec::with_capacity(pairs.len() - first_valid);
        let mut values = Vec::with_capacity(pairs.len() - first_valid);
        let mut last_valid = pairs[first_valid].1;
        let mut filled = 0usize;

        for &(ts, v) in &pairs[first_valid..] {
            let off_grid = || {
                AnalysisError::TimestampError(format!(
                    "{} is not on the {}s grid starting at {}",
                    ts,
                    step.num_seconds(),
                    origin
                ))
            };
            let offset_ns = (ts - origin).num_nanoseconds().ok_or_else(off_grid)?;
            if offset_ns % step_ns != 0 {
                return Err(off_grid());
            }

            let slot = (offset_ns / step_ns) as usize;
            while timestamps.len() < slot {
                timestamps.push(origin + step * timestamps.len() as i32);
                values.push(last_valid);
                filled += 1;
            }

            if v.is_finite() {
                last_valid = v;
            } else {
                filled += 1;
            }
            timestamps.push(ts);
            values.push(last_valid);
        }

        if filled > 0 || first_valid > 0 {
            tracing::debug!(
                filled,
                dropped_leading = first_valid,
                len = values.len(),
                "normalised series onto regular grid"
            );
        }

        Ok(Self {
            timestamps,
            values,
            name: None,
            frequency,
        })
    }

    /// Build an hourly series starting at `start`.
    pub fn hourly(start: DateTime<Utc>, values: Vec<f64>) -> Result<Self> {
        SeriesBuilder::new().start(start).values(values).build()
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return a copy carrying the given name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Iterate over (timestamp, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// A series on the same index holding different values.
    ///
    /// Used to build derived series; values are taken as-is, `NaN` marking
    /// undefined entries.
    pub fn with_values(&self, values: Vec<f64>) -> Result<Series> {
        if values.len() != self.len() {
            return Err(AnalysisError::DimensionMismatch {
                expected: self.len(),
                got: values.len(),
            });
        }
        Ok(Series {
            timestamps: self.timestamps.clone(),
            values,
            name: self.name.clone(),
            frequency: self.frequency,
        })
    }

    /// The first `n` observations (or the whole series if shorter).
    pub fn head(&self, n: usize) -> Series {
        let end = n.min(self.len());
        Series {
            timestamps: self.timestamps[..end].to_vec(),
            values: self.values[..end].to_vec(),
            name: self.name.clone(),
            frequency: self.frequency,
        }
    }

    /// Whether the value at `index` is defined.
    pub fn is_defined(&self, index: usize) -> bool {
        self.values.get(index).is_some_and(|v| v.is_finite())
    }

    /// Number of defined values.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }

    /// Check if any value is undefined.
    pub fn has_undefined(&self) -> bool {
        self.values.iter().any(|v| !v.is_finite())
    }

    /// Defined values in order, skipping undefined entries.
    pub fn defined_values(&self) -> Vec<f64> {
        self.values.iter().copied().filter(|v| v.is_finite()).collect()
    }
}

/// Build `len` timestamps spaced by `frequency` from `start`.
pub fn regular_index(start: DateTime<Utc>, frequency: Frequency, len: usize) -> Vec<DateTime<Utc>> {
    let step = frequency.duration();
    (0..len).map(|i| start + step * i as i32).collect()
}

/// Infer the spacing of raw timestamps as their modal difference.
///
/// `tolerance` is the minimum share of differences that must equal the
/// mode for it to be accepted.
pub fn infer_spacing(timestamps: &[DateTime<Utc>], tolerance: f64) -> Result<Duration> {
    if timestamps.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            needed: 2,
            got: timestamps.len(),
        });
    }

    let mut counts: HashMap<i64, usize> = HashMap::new();
    for w in timestamps.windows(2) {
        *counts.entry((w[1] - w[0]).num_seconds()).or_insert(0) += 1;
    }

    let (modal_diff, modal_count) = counts
        .iter()
        .max_by_key(|(&diff, &count)| (count, -diff))
        .map(|(&diff, &count)| (diff, count))
        .ok_or_else(|| AnalysisError::TimestampError("empty spacing data".to_string()))?;

    let total = timestamps.len() - 1;
    if (modal_count as f64 / total as f64) < tolerance {
        return Err(AnalysisError::TimestampError(
            "no unique modal spacing found".to_string(),
        ));
    }

    Ok(Duration::seconds(modal_diff))
}
