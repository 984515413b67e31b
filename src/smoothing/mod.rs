//! Centered moving-average smoothing and long-window trend extraction.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use gridscope::core::Series;
//! use gridscope::smoothing::smooth;
//!
//! let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
//! let series = Series::hourly(start, vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//!
//! // A window of 1 is clamped to 2
//! let smoothed = smooth(&series, 1).unwrap();
//! assert_eq!(smoothed.window(), 2);
//! assert!(smoothed.values()[0].is_nan());
//! assert_eq!(smoothed.values()[1], 1.5);
//! ```

mod sma;

pub use sma::{
    centered_mean, extract_trend, smooth, EdgePolicy, SmoothedSeries, Smoother,
    DEFAULT_TREND_DAYS, MIN_WINDOW,
};
