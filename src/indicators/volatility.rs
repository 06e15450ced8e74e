// =============================================================================
// Volatility — rolling standard deviation of percent returns
// =============================================================================
//
// Each value is the sample standard deviation (n-1 divisor) of the last
// `window` percent-changes of close. A constant-price series therefore reads
// exactly 0, which is a valid value, distinct from "not enough data".

/// Default rolling window for the return stdev.
pub const VOLATILITY_WINDOW: usize = 20;

/// Every defined volatility value of the series, oldest first.
///
/// The first value covers the first `window` percent-changes (i.e. the first
/// `window + 1` closes); a series of `n` closes yields `n - window` values.
/// Empty when `window < 2` or the series is too short.
pub fn volatility_series(closes: &[f64], window: usize) -> Vec<f64> {
    if window < 2 || closes.len() < window + 1 {
        return Vec::new();
    }

    let returns: Vec<f64> = closes.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();

    returns.windows(window).map(sample_stdev).collect()
}

/// Volatility at the latest point, or `None` when the series is too short.
pub fn calculate_volatility(closes: &[f64], window: usize) -> Option<f64> {
    volatility_series(closes, window).last().copied()
}

/// Sample standard deviation (n-1 divisor). Caller guarantees `xs.len() >= 2`.
fn sample_stdev(xs: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let variance = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volatility_insufficient_data() {
        // window + 1 closes are required: 20 closes give only 19 returns.
        let closes = vec![100.0; VOLATILITY_WINDOW];
        assert!(calculate_volatility(&closes, VOLATILITY_WINDOW).is_none());
        assert!(volatility_series(&closes, VOLATILITY_WINDOW).is_empty());
    }

    #[test]
    fn volatility_constant_series_is_zero() {
        // No variance at all: the stdev of all-zero returns is exactly 0.
        let closes = vec![100.0; 30];
        let vol = calculate_volatility(&closes, VOLATILITY_WINDOW).unwrap();
        assert_eq!(vol, 0.0);
    }

    #[test]
    fn volatility_series_length() {
        // n closes => n - window defined values.
        let closes: Vec<f64> = (1..=30).map(|x| 100.0 + x as f64).collect();
        let series = volatility_series(&closes, VOLATILITY_WINDOW);
        assert_eq!(series.len(), 30 - VOLATILITY_WINDOW);
    }

    #[test]
    fn volatility_known_value() {
        // Alternating +10% / ~-9.09% moves over window 2.
        // closes 100, 110, 100: returns 0.1 and -0.0909..;
        // sample stdev of [0.1, -1/11] = |0.1 + 1/11| / sqrt(2).
        let closes = vec![100.0, 110.0, 100.0];
        let series = volatility_series(&closes, 2);
        assert_eq!(series.len(), 1);
        let expected = (0.1_f64 + 1.0 / 11.0) / 2.0_f64.sqrt();
        assert!((series[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn volatility_increases_with_larger_swings() {
        let calm: Vec<f64> = (0..40).map(|i| 100.0 + (i % 2) as f64 * 0.1).collect();
        let wild: Vec<f64> = (0..40).map(|i| 100.0 + (i % 2) as f64 * 10.0).collect();
        let calm_vol = calculate_volatility(&calm, VOLATILITY_WINDOW).unwrap();
        let wild_vol = calculate_volatility(&wild, VOLATILITY_WINDOW).unwrap();
        assert!(wild_vol > calm_vol);
    }
}
