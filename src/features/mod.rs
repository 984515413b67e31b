//! Statistical features of a series.
//!
//! # Example
//!
//! ```
//! use gridscope::features::{autocorrelation, basic};
//!
//! let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//!
//! let m = basic::mean(&series);
//! let r1 = autocorrelation::autocorrelation(&series, 1);
//! assert!((m - 3.0).abs() < 1e-12);
//! assert!((r1 - 0.4).abs() < 1e-12);
//! ```

pub mod autocorrelation;
pub mod basic;

pub use autocorrelation::{acf, autocorrelation, AutocorrelationProfile, DEFAULT_MAX_LAG};
pub use basic::{mean, variance, variance_sample};
