//! Basic descriptive statistics over plain slices.

/// Returns the arithmetic mean.
pub fn mean(series: &[f64]) -> f64 {
    if series.is_empty() {
        return f64::NAN;
    }
    series.iter().sum::<f64>() / series.len() as f64
}

/// Returns the population variance (with n denominator).
pub fn variance(series: &[f64]) -> f64 {
    if series.is_empty() {
        return f64::NAN;
    }
    if series.len() == 1 {
        return 0.0;
    }
    let m = mean(series);
    series.iter().map(|x| (x - m).powi(2)).sum::<f64>() / series.len() as f64
}

/// Returns the sample variance (with n-1 denominator).
pub fn variance_sample(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return f64::NAN;
    }
    let m = mean(series);
    series.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (series.len() - 1) as f64
}

/// Whether a spread (sum of squared deviations, or a variance) is zero at the
/// precision of data whose matching sum or mean of squares is `energy`.
pub(crate) fn negligible_spread(spread: f64, energy: f64) -> bool {
    spread <= f64::EPSILON * energy
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_basic() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0, epsilon = 1e-10);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn variance_population_and_sample() {
        let series = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(variance(&series), 4.0, epsilon = 1e-10);
        assert_relative_eq!(variance_sample(&series), 32.0 / 7.0, epsilon = 1e-10);
    }

    #[test]
    fn variance_degenerate_inputs() {
        assert!(variance(&[]).is_nan());
        assert_eq!(variance(&[3.0]), 0.0);
        assert!(variance_sample(&[3.0]).is_nan());
    }

    #[test]
    fn negligible_spread_scales_with_data() {
        // Rounding noise around a large constant
        assert!(negligible_spread(1e-20, 1e6));
        assert!(negligible_spread(0.0, 0.0));
        // Tiny but genuine variation
        assert!(!negligible_spread(4.5e-11, 1e-10));
    }
}
