//! Input boundary: where series come from.
//!
//! The analysis components never perform I/O themselves. A caller acquires a
//! [`Series`](crate::core::Series) from a [`DataSource`] once, then hands it
//! to each component.
//!
//! # Example
//!
//! ```
//! use gridscope::source::{DataSource, SyntheticLoad};
//!
//! let source = SyntheticLoad::new(3).with_seed(7);
//! let series = source.load().unwrap();
//! assert_eq!(series.len(), 72);
//! ```

mod synthetic;
mod tabular;

pub use synthetic::SyntheticLoad;
pub use tabular::CsvSource;

use crate::core::Series;
use crate::error::Result;

/// A synchronous provider of a complete series.
pub trait DataSource {
    /// Short label used in logs and reports.
    fn name(&self) -> &str;

    /// Acquire the series.
    ///
    /// Fails with [`AnalysisError::DataUnavailable`](crate::AnalysisError::DataUnavailable)
    /// when the source cannot be read or holds no observations.
    fn load(&self) -> Result<Series>;
}
