//! # gridscope
//!
//! Temporal structure analysis for regularly sampled load series.
//!
//! Provides classical additive and multiplicative seasonal decomposition,
//! centered moving-average smoothing and autocorrelation profiles, along
//! with a seeded synthetic load generator and a CSV loader.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::needless_range_loop)]

pub mod analysis;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod seasonality;
pub mod smoothing;
pub mod source;

pub use error::{AnalysisError, Result};

pub mod prelude {
    pub use crate::analysis::{analyze, AnalysisReport};
    pub use crate::config::AnalysisConfig;
    pub use crate::core::{Frequency, Series};
    pub use crate::error::{AnalysisError, Result};
    pub use crate::features::{acf, AutocorrelationProfile};
    pub use crate::seasonality::{decompose, DecompositionMode, DecompositionResult};
    pub use crate::smoothing::{smooth, EdgePolicy, SmoothedSeries};
    pub use crate::source::{CsvSource, DataSource, SyntheticLoad};
}
