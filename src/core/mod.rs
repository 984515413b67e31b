//! Core data structures shared by every analysis component.

mod series;

pub use series::{infer_spacing, regular_index, Frequency, Series, SeriesBuilder};
