//! End-to-end tests: load or generate a series, then run every view.

use gridscope::prelude::*;
use std::io::Write;

fn sixty_days() -> Series {
    SyntheticLoad::new(60).with_seed(42).generate().unwrap()
}

#[test]
fn synthetic_additive_decomposition_recovers_daily_cycle() {
    let series = sixty_days();
    assert_eq!(series.len(), 1440);

    let result = decompose(&series, 24, DecompositionMode::Additive).unwrap();

    // The two sinusoids peak together near midday
    let peak = result.peak_phase();
    assert!((11..=12).contains(&peak), "peak phase {}", peak);
    let trough = result.trough_phase();
    assert!(trough == 23 || trough == 0, "trough phase {}", trough);

    let residual_std = result.residual_std();
    assert!(
        residual_std > 12.0 && residual_std < 22.0,
        "residual std {}",
        residual_std
    );
    assert!(result.seasonal_strength() > 0.9);
}

#[test]
fn synthetic_autocorrelation_peaks_at_daily_lag() {
    let series = sixty_days();
    let profile = acf(&series, 48).unwrap();

    assert_eq!(profile.len(), 49);
    let r24 = profile.correlation_at(24).unwrap();
    let r12 = profile.correlation_at(12).unwrap();
    let r48 = profile.correlation_at(48).unwrap();
    assert!(r24 > 0.8, "r24 = {}", r24);
    assert!(r48 > 0.7, "r48 = {}", r48);
    assert!(r12 < -0.5, "r12 = {}", r12);

    let significant = profile.significant_lags(0.95).unwrap();
    assert!(significant.contains(&24));
}

#[test]
fn short_series_cannot_be_decomposed() {
    let series = sixty_days().head(47);
    let err = decompose(&series, 24, DecompositionMode::Additive).unwrap_err();
    assert_eq!(err, AnalysisError::InsufficientData { needed: 48, got: 47 });

    // Exactly two periods is enough
    let series = sixty_days().head(48);
    assert!(decompose(&series, 24, DecompositionMode::Additive).is_ok());
}

#[test]
fn seeded_generation_is_reproducible() {
    let a = SyntheticLoad::new(5).with_seed(9).generate().unwrap();
    let b = SyntheticLoad::new(5).with_seed(9).generate().unwrap();
    let c = SyntheticLoad::new(5).with_seed(10).generate().unwrap();

    assert_eq!(a.values(), b.values());
    assert_ne!(a.values(), c.values());
}

#[test]
fn report_covers_all_views() {
    let series = sixty_days();
    let config = AnalysisConfig::default()
        .with_mode(DecompositionMode::Multiplicative)
        .with_window(24);
    let report = analyze(&series, &config);

    assert!(report.is_complete(), "{:?}", report.errors());
    let decomposition = report.decomposition.unwrap();
    assert_eq!(decomposition.observed().len(), 720);
    assert_eq!(decomposition.mode(), DecompositionMode::Multiplicative);

    let smoothing = report.smoothing.unwrap();
    assert_eq!(smoothing.window(), 24);
    assert_eq!(smoothing.series().defined_count(), 168 - 24 + 1);
}

#[test]
fn csv_source_feeds_the_report() {
    let generated = SyntheticLoad::new(3).with_seed(1).generate().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("load.csv");

    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "timestamp,value").unwrap();
    for (ts, v) in generated.iter() {
        writeln!(file, "{},{}", ts.to_rfc3339(), v).unwrap();
    }
    drop(file);

    let loaded = CsvSource::new(&path).load().unwrap();
    assert_eq!(loaded.len(), 72);
    assert_eq!(loaded.timestamps(), generated.timestamps());
    for (a, b) in loaded.values().iter().zip(generated.values()) {
        assert!((a - b).abs() < 1e-9);
    }

    let config = AnalysisConfig::default().with_max_lag(24);
    let report = analyze(&loaded, &config);
    assert!(report.is_complete(), "{:?}", report.errors());
}

#[test]
fn missing_csv_reports_data_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = CsvSource::new(dir.path().join("absent.csv")).load().unwrap_err();
    assert!(matches!(err, AnalysisError::DataUnavailable(_)));
}
