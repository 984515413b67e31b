//! CSV table source: one timestamp column and one numeric value column.

use super::DataSource;
use crate::core::{infer_spacing, Frequency, Series};
use crate::error::{AnalysisError, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Reads an hourly series from a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    timestamp_column: String,
    value_column: String,
    frequency: Frequency,
    label: String,
}

impl CsvSource {
    /// Source reading `path` with the default `timestamp` / `value` columns.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let label = path.display().to_string();
        Self {
            path,
            timestamp_column: "timestamp".to_string(),
            value_column: "value".to_string(),
            frequency: Frequency::Hourly,
            label,
        }
    }

    pub fn timestamp_column(mut self, column: impl Into<String>) -> Self {
        self.timestamp_column = column.into();
        self
    }

    pub fn value_column(mut self, column: impl Into<String>) -> Self {
        self.value_column = column.into();
        self
    }

    /// Expected spacing of the table (hourly by default).
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_pairs(&self) -> Result<Vec<(DateTime<Utc>, f64)>> {
        let file = File::open(&self.path).map_err(|e| unavailable(&self.path, e))?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(|e| unavailable(&self.path, e))?
            .clone();
        let ts_idx = column_index(&headers, &self.timestamp_column)?;
        let value_idx = column_index(&headers, &self.value_column)?;

        let mut pairs = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| unavailable(&self.path, e))?;
            let raw_ts = record.get(ts_idx).unwrap_or("").trim();
            let ts = parse_timestamp(raw_ts).ok_or_else(|| {
                AnalysisError::DataUnavailable(format!(
                    "row {}: cannot parse timestamp '{}'",
                    row + 1,
                    raw_ts
                ))
            })?;

            // Empty or non-numeric cells are gaps, filled later by the series model.
            let value = record
                .get(value_idx)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .unwrap_or(f64::NAN);
            pairs.push((ts, value));
        }

        Ok(pairs)
    }
}

impl DataSource for CsvSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn load(&self) -> Result<Series> {
        let result = self.read_pairs().and_then(|pairs| {
            let timestamps: Vec<_> = pairs.iter().map(|(ts, _)| *ts).collect();
            if timestamps.len() >= 2 {
                let spacing = infer_spacing(&timestamps, 0.5)?;
                if spacing != self.frequency.duration() {
                    return Err(AnalysisError::TimestampError(format!(
                        "table spacing is {}s, expected {}s",
                        spacing.num_seconds(),
                        self.frequency.duration().num_seconds()
                    )));
                }
            }
            Series::from_pairs(pairs, self.frequency)
        });

        match result {
            Ok(series) => {
                tracing::info!(source = %self.label, points = series.len(), "loaded series");
                Ok(series.with_name(self.value_column.clone()))
            }
            Err(e) => {
                tracing::warn!(source = %self.label, error = %e, "failed to load series");
                Err(e)
            }
        }
    }
}

fn unavailable(path: &Path, err: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::DataUnavailable(format!("{}: {}", path.display(), err))
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| AnalysisError::DataUnavailable(format!("column '{}' not found", name)))
}

/// Parse RFC 3339, or a naive date-time taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_loads_named_columns_and_fills_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "load.csv",
            "ts,load_mw,temperature\n\
             2025-01-01 00:00:00,500.0,3.1\n\
             2025-01-01 01:00:00,,3.0\n\
             2025-01-01 02:00:00,520.5,2.8\n\
             2025-01-01 04:00:00,530.0,2.5\n",
        );

        let series = CsvSource::new(&path)
            .timestamp_column("ts")
            .value_column("load_mw")
            .load()
            .unwrap();

        assert_eq!(series.len(), 5);
        assert_eq!(series.values(), &[500.0, 500.0, 520.5, 520.5, 530.0]);
        assert_eq!(series.name(), Some("load_mw"));
    }

    #[test]
    fn csv_accepts_rfc3339_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "load.csv",
            "timestamp,value\n2025-01-01T00:00:00Z,1\n2025-01-01T01:00:00+00:00,2\n",
        );

        let series = CsvSource::new(&path).load().unwrap();
        assert_eq!(series.values(), &[1.0, 2.0]);
    }

    #[test]
    fn csv_rejects_fractional_second_offsets() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "load.csv",
            "timestamp,value\n\
             2025-01-01T00:00:00Z,1\n\
             2025-01-01T01:00:00.0005Z,2\n\
             2025-01-01T02:00:00Z,3\n\
             2025-01-01T03:00:00Z,4\n",
        );

        let result = CsvSource::new(&path).load();
        assert!(matches!(result, Err(AnalysisError::TimestampError(_))));
    }

    #[test]
    fn csv_missing_file_is_data_unavailable() {
        let result = CsvSource::new("/nonexistent/power_load_hourly.csv").load();
        assert!(matches!(result, Err(AnalysisError::DataUnavailable(_))));
    }

    #[test]
    fn csv_without_rows_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "empty.csv", "timestamp,value\n");
        let result = CsvSource::new(&path).load();
        assert!(matches!(result, Err(AnalysisError::DataUnavailable(_))));
    }

    #[test]
    fn csv_unknown_column_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "load.csv", "timestamp,value\n2025-01-01 00:00:00,1\n");
        let result = CsvSource::new(&path).value_column("load_mw").load();
        assert!(matches!(result, Err(AnalysisError::DataUnavailable(_))));
    }

    #[test]
    fn csv_bad_timestamp_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "load.csv", "timestamp,value\nyesterday,1\n");
        let result = CsvSource::new(&path).load();
        assert!(matches!(result, Err(AnalysisError::DataUnavailable(_))));
    }

    #[test]
    fn csv_rejects_non_hourly_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "daily.csv",
            "timestamp,value\n2025-01-01 00:00:00,1\n2025-01-02 00:00:00,2\n2025-01-03 00:00:00,3\n",
        );
        let result = CsvSource::new(&path).load();
        assert!(matches!(result, Err(AnalysisError::TimestampError(_))));
    }
}
