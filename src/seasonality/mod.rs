//! Seasonal decomposition.
//!
//! Classical decomposition splits a series into a moving-average trend, a
//! repeating seasonal profile and a residual, combined additively or
//! multiplicatively.

mod classical;

pub use classical::{
    decompose, period_moving_average, ClassicalDecomposition, DecompositionMode,
    DecompositionResult, DEFAULT_PERIOD,
};
