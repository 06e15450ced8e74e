// =============================================================================
// Trend strength — simplified directional-movement (ADX-like) read
// =============================================================================
//
// Per bar-to-bar transition:
//   TR  = max(high - low, |high - prevClose|, |low - prevClose|)
//   DM+ = up-move   if it exceeds the down-move and is positive, else 0
//   DM- = down-move if it exceeds the up-move and is positive, else 0
//
// TR, DM+, and DM- are smoothed with a `period`-bar simple rolling mean at
// the latest point, then:
//   DI+      = 100 * smoothed DM+ / smoothed TR    (DI- analogous)
//   strength = |DI+ - DI-|
//   direction = bullish if DI+ > DI- else bearish
//
// Unlike the full ADX there is no second smoothing pass over DX; strength is
// the raw DI spread.

use serde::{Deserialize, Serialize};

use crate::market_data::Candle;
use crate::types::TrendDirection;

/// Rolling-mean window for TR / DM smoothing.
pub const TREND_WINDOW: usize = 14;

/// Directional trend conviction at the latest point of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendStrength {
    pub direction: TrendDirection,
    /// |DI+ - DI-|, non-negative.
    pub strength: f64,
}

/// Compute the trend strength from OHLC candles.
///
/// Returns `None` when:
/// - `period` is zero or fewer than `period + 1` candles are supplied
///   (we need `period` bar-to-bar transitions).
/// - The smoothed true range is zero (no price movement to measure against).
/// - Any intermediate value is non-finite.
pub fn calculate_trend_strength(candles: &[Candle], period: usize) -> Option<TrendStrength> {
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    let n = candles.len();
    let transitions = n - 1;

    let mut tr_vals = Vec::with_capacity(transitions);
    let mut plus_dm = Vec::with_capacity(transitions);
    let mut minus_dm = Vec::with_capacity(transitions);

    for i in 1..n {
        let high = candles[i].high;
        let low = candles[i].low;
        let prev_high = candles[i - 1].high;
        let prev_low = candles[i - 1].low;
        let prev_close = candles[i - 1].close;

        let tr = (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs());

        let up_move = high - prev_high;
        let down_move = prev_low - low;

        let pdm = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        let mdm = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };

        tr_vals.push(tr);
        plus_dm.push(pdm);
        minus_dm.push(mdm);
    }

    let smooth_tr = tail_mean(&tr_vals, period);
    let smooth_plus_dm = tail_mean(&plus_dm, period);
    let smooth_minus_dm = tail_mean(&minus_dm, period);

    if smooth_tr == 0.0 {
        return None;
    }

    let di_plus = smooth_plus_dm / smooth_tr * 100.0;
    let di_minus = smooth_minus_dm / smooth_tr * 100.0;

    let strength = (di_plus - di_minus).abs();
    if !strength.is_finite() {
        return None;
    }

    let direction = if di_plus > di_minus {
        TrendDirection::Bullish
    } else {
        TrendDirection::Bearish
    };

    Some(TrendStrength {
        direction,
        strength,
    })
}

/// Simple mean of the last `window` values. Caller guarantees
/// `xs.len() >= window >= 1`.
fn tail_mean(xs: &[f64], window: usize) -> f64 {
    xs[xs.len() - window..].iter().sum::<f64>() / window as f64
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            time: 0,
            open,
            high,
            low,
            close,
            volume: 1.0,
        }
    }

    #[test]
    fn trend_period_zero() {
        let candles = vec![candle(1.0, 2.0, 0.5, 1.5); 30];
        assert!(calculate_trend_strength(&candles, 0).is_none());
    }

    #[test]
    fn trend_insufficient_data() {
        // period + 1 candles are needed for `period` transitions.
        let candles = vec![candle(1.0, 2.0, 0.5, 1.5); TREND_WINDOW];
        assert!(calculate_trend_strength(&candles, TREND_WINDOW).is_none());
    }

    #[test]
    fn trend_exact_minimum_length() {
        let candles: Vec<Candle> = (0..=TREND_WINDOW)
            .map(|i| {
                let base = 100.0 + i as f64;
                candle(base, base + 1.0, base - 0.5, base + 0.5)
            })
            .collect();
        assert!(calculate_trend_strength(&candles, TREND_WINDOW).is_some());
    }

    #[test]
    fn trend_uptrend_is_bullish() {
        // Higher highs and higher lows every bar: DM- is zero throughout.
        let candles: Vec<Candle> = (0..30)
            .map(|i| {
                let base = 100.0 + i as f64 * 2.0;
                candle(base, base + 1.5, base - 0.5, base + 1.0)
            })
            .collect();
        let trend = calculate_trend_strength(&candles, TREND_WINDOW).unwrap();
        assert_eq!(trend.direction, TrendDirection::Bullish);
        assert!(trend.strength > 0.0);
    }

    #[test]
    fn trend_downtrend_is_bearish() {
        let candles: Vec<Candle> = (0..30)
            .map(|i| {
                let base = 200.0 - i as f64 * 2.0;
                candle(base, base + 0.5, base - 1.5, base - 1.0)
            })
            .collect();
        let trend = calculate_trend_strength(&candles, TREND_WINDOW).unwrap();
        assert_eq!(trend.direction, TrendDirection::Bearish);
        assert!(trend.strength > 0.0);
    }

    #[test]
    fn trend_flat_market_reads_zero_strength() {
        // Identical candles: both DMs are zero while TR stays positive.
        let candles = vec![candle(100.0, 101.0, 99.0, 100.0); 30];
        let trend = calculate_trend_strength(&candles, TREND_WINDOW).unwrap();
        assert_eq!(trend.strength, 0.0);
        assert_eq!(trend.direction, TrendDirection::Bearish);
    }

    #[test]
    fn trend_zero_range_is_undefined() {
        // Degenerate single-price candles: TR is zero, the DI ratio has no
        // meaning, and the result must be missing rather than zero.
        let candles = vec![candle(100.0, 100.0, 100.0, 100.0); 30];
        assert!(calculate_trend_strength(&candles, TREND_WINDOW).is_none());
    }

    #[test]
    fn trend_strength_is_bounded_by_di_range() {
        let candles: Vec<Candle> = (0..60)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.4).sin() * 8.0;
                candle(base - 0.5, base + 1.0, base - 1.0, base + 0.5)
            })
            .collect();
        if let Some(trend) = calculate_trend_strength(&candles, TREND_WINDOW) {
            assert!((0.0..=100.0).contains(&trend.strength));
        }
    }
}
