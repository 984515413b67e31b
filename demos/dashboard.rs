//! Dashboard example: load a series and print every analysis view.
//!
//! Run with: cargo run --example dashboard -- [path/to/load.csv] [additive|multiplicative] [window]
//!
//! Without a readable CSV the example falls back to 60 days of synthetic load.
//! Set `RUST_LOG=gridscope=debug` to see per-view timings.

use gridscope::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gridscope=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    println!("=== Load Series Dashboard ===\n");

    // 1. Load data
    let series = match args.first() {
        Some(path) => match CsvSource::new(path).load() {
            Ok(series) => series,
            Err(AnalysisError::DataUnavailable(reason)) => {
                println!("Could not load {}: {}", path, reason);
                println!("Falling back to synthetic data.\n");
                synthetic()
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => synthetic(),
    };

    // 2. Settings
    let mode = match args.get(1).map(|s| s.parse::<DecompositionMode>()) {
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        None => DecompositionMode::Additive,
    };
    let window = args
        .get(2)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(24);
    let config = AnalysisConfig::default().with_mode(mode).with_window(window);

    println!(
        "Series: {} ({} points, {} to {})",
        series.name().unwrap_or("unnamed"),
        series.len(),
        series.timestamps()[0],
        series.timestamps()[series.len() - 1]
    );
    println!("Mode: {}, smoothing window: {}\n", config.mode, config.window);

    // 3. Analyse
    let report = analyze(&series, &config);

    println!("--- Decomposition (first {} days) ---", config.decomposition_days);
    match &report.decomposition {
        Ok(result) => {
            println!("Peak phase:         {:>8}", result.peak_phase());
            println!("Trough phase:       {:>8}", result.trough_phase());
            println!("Seasonal strength:  {:>8.3}", result.seasonal_strength());
            println!("Trend strength:     {:>8.3}", result.trend_strength());
            println!("Residual std:       {:>8.2}", result.residual_std());
            println!("\nSeasonal profile:");
            for (phase, s) in result.seasonal_profile().iter().enumerate() {
                println!("  {:>2}: {:>10.3}", phase, s);
            }
        }
        Err(e) => println!("Unavailable: {}", e),
    }

    println!("\n--- Autocorrelation (max lag {}) ---", config.max_lag);
    match &report.autocorrelation {
        Ok(profile) => {
            let bounds = profile
                .confidence_bounds(config.confidence_level)
                .unwrap_or_default();
            println!("{:<6} {:>10} {:>10}", "Lag", "ACF", "Bound");
            println!("{:-<28}", "");
            for (lag, r) in profile.lags().step_by(6) {
                let bound = bounds.get(lag).copied().unwrap_or(f64::NAN);
                println!("{:<6} {:>10.4} {:>10.4}", lag, r, bound);
            }
        }
        Err(e) => println!("Unavailable: {}", e),
    }

    println!("\n--- Trend ({} day window) ---", config.trend_days);
    match &report.trend {
        Ok(trend) => println!(
            "Window {} ({} defined points)",
            trend.window(),
            trend.series().defined_count()
        ),
        Err(e) => println!("Unavailable: {}", e),
    }

    println!("\n--- Smoothing (first {} days) ---", config.smoothing_days);
    match &report.smoothing {
        Ok(smoothed) => {
            if smoothed.was_clamped() {
                println!(
                    "Window {} clamped to {}",
                    smoothed.requested_window(),
                    smoothed.window()
                );
            }
            for (ts, v) in smoothed.series().iter().take(24) {
                println!("  {}  {:>10.2}", ts.format("%Y-%m-%d %H:%M"), v);
            }
        }
        Err(e) => println!("Unavailable: {}", e),
    }

    if !report.is_complete() {
        println!("\n{} view(s) failed", report.errors().len());
    }
}

fn synthetic() -> Series {
    match SyntheticLoad::default().with_seed(42).generate() {
        Ok(series) => series,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
