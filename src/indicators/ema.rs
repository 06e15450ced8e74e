// =============================================================================
// Exponential Moving Average (EMA) and EMA-crossover momentum
// =============================================================================
//
// Formula:
//   alpha = 2 / (span + 1)
//   EMA_t = close_t * alpha + EMA_{t-1} * (1 - alpha)
//
// The recurrence is seeded with the very first close, so the EMA is defined
// for any non-empty series; a single-element series returns that element.
//
// Momentum compares EMA(20) to EMA(50) at the latest point:
//   trend        = bullish if EMA20 > EMA50 else bearish
//   strength_pct = |EMA20 - EMA50| / EMA50 * 100

use serde::{Deserialize, Serialize};

use crate::types::TrendDirection;

/// Fast EMA span used by the momentum read.
pub const MOMENTUM_FAST_SPAN: usize = 20;
/// Slow EMA span used by the momentum read.
pub const MOMENTUM_SLOW_SPAN: usize = 50;

/// EMA-crossover momentum at the latest point of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Momentum {
    pub trend: TrendDirection,
    /// Spread between the fast and slow EMA, in percent of the slow EMA.
    pub strength_pct: f64,
}

/// Compute the full EMA series for `closes` with smoothing span `span`.
///
/// Returns a vector the same length as the input; empty when the input is
/// empty or `span` is zero.
pub fn calculate_ema(closes: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || closes.is_empty() {
        return Vec::new();
    }

    let alpha = 2.0 / (span as f64 + 1.0);

    let mut result = Vec::with_capacity(closes.len());
    let mut prev = closes[0];
    result.push(prev);

    for &close in &closes[1..] {
        let ema = close * alpha + prev * (1.0 - alpha);
        result.push(ema);
        prev = ema;
    }

    result
}

/// EMA(20) vs EMA(50) momentum at the latest point.
///
/// Returns `None` when the series is empty, EMA50 is zero, or the spread is
/// non-finite.
pub fn calculate_momentum(closes: &[f64]) -> Option<Momentum> {
    let ema_fast = *calculate_ema(closes, MOMENTUM_FAST_SPAN).last()?;
    let ema_slow = *calculate_ema(closes, MOMENTUM_SLOW_SPAN).last()?;

    if ema_slow == 0.0 {
        return None;
    }

    let strength_pct = (ema_fast - ema_slow).abs() / ema_slow * 100.0;
    if !strength_pct.is_finite() {
        return None;
    }

    let trend = if ema_fast > ema_slow {
        TrendDirection::Bullish
    } else {
        TrendDirection::Bearish
    };

    Some(Momentum {
        trend,
        strength_pct,
    })
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 20).is_empty());
    }

    #[test]
    fn ema_span_zero() {
        assert!(calculate_ema(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn ema_single_element_returns_seed() {
        let ema = calculate_ema(&[42.5], 20);
        assert_eq!(ema, vec![42.5]);
    }

    #[test]
    fn ema_matches_recurrence() {
        // span 4 => alpha = 0.4; seed with the first close.
        let closes = vec![10.0, 12.0, 11.0, 13.0];
        let ema = calculate_ema(&closes, 4);
        assert_eq!(ema.len(), 4);

        let alpha = 2.0 / 5.0;
        let mut expected = vec![10.0];
        for &c in &closes[1..] {
            let prev = *expected.last().unwrap();
            expected.push(c * alpha + prev * (1.0 - alpha));
        }
        for (a, b) in ema.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12, "got {a}, expected {b}");
        }
    }

    #[test]
    fn ema_flat_series_stays_flat() {
        let closes = vec![100.0; 60];
        for &v in &calculate_ema(&closes, 20) {
            assert!((v - 100.0).abs() < 1e-10);
        }
    }

    #[test]
    fn momentum_empty_series() {
        assert!(calculate_momentum(&[]).is_none());
    }

    #[test]
    fn momentum_constant_series_has_zero_strength() {
        // EMA20 == EMA50, so the spread is exactly zero.
        let closes = vec![100.0; 60];
        let momentum = calculate_momentum(&closes).unwrap();
        assert!(momentum.strength_pct.abs() < 1e-10);
        assert_eq!(momentum.trend, TrendDirection::Bearish);
    }

    #[test]
    fn momentum_rising_series_is_bullish() {
        // The faster EMA tracks a rising price more closely.
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let momentum = calculate_momentum(&closes).unwrap();
        assert_eq!(momentum.trend, TrendDirection::Bullish);
        assert!(momentum.strength_pct > 0.0);
    }

    #[test]
    fn momentum_falling_series_is_bearish() {
        let closes: Vec<f64> = (1..=60).rev().map(|x| x as f64).collect();
        let momentum = calculate_momentum(&closes).unwrap();
        assert_eq!(momentum.trend, TrendDirection::Bearish);
        assert!(momentum.strength_pct > 0.0);
    }

    #[test]
    fn momentum_zero_slow_ema_is_undefined() {
        // An all-zero series drives both EMAs to zero.
        let closes = vec![0.0; 60];
        assert!(calculate_momentum(&closes).is_none());
    }
}
