// =============================================================================
// Support / resistance — statistical price band
// =============================================================================
//
// Over the tail of the series:
//   support    = mean(low)  - stdev(low)
//   resistance = mean(high) + stdev(high)
//
// This is deliberately a simple statistical band around recent price action,
// not a structural pivot/swing-point detector.

use serde::{Deserialize, Serialize};

use crate::market_data::Candle;

/// Number of trailing candles the band is computed over.
pub const LEVELS_LOOKBACK: usize = 30;

/// Scalar support/resistance price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    pub support: f64,
    pub resistance: f64,
}

/// Compute the band over the last `min(lookback, len)` candles.
///
/// Returns `None` when fewer than 2 candles are available (the sample stdev
/// needs at least two observations) or the result is non-finite.
pub fn calculate_support_resistance(candles: &[Candle], lookback: usize) -> Option<PriceBand> {
    let n = candles.len().min(lookback);
    if n < 2 {
        return None;
    }

    let tail = &candles[candles.len() - n..];

    let (low_mean, low_stdev) = mean_and_stdev(tail.iter().map(|c| c.low));
    let (high_mean, high_stdev) = mean_and_stdev(tail.iter().map(|c| c.high));

    let support = low_mean - low_stdev;
    let resistance = high_mean + high_stdev;

    if support.is_finite() && resistance.is_finite() {
        Some(PriceBand {
            support,
            resistance,
        })
    } else {
        None
    }
}

/// Mean and sample standard deviation (n-1 divisor) of an iterator of at
/// least two values.
fn mean_and_stdev(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let xs: Vec<f64> = values.collect();
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let variance = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance.sqrt())
}
