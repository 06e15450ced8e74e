// =============================================================================
// Candle series — time-sorted OHLCV data
// =============================================================================
//
// Raw sources may deliver candles in reverse-chronological order; every
// calculation in the engine assumes ascending timestamps, so normalization
// happens exactly once, here. The minimum-history gate is the sole hard
// precondition in the pipeline: anything downstream may assume at least
// `MIN_CANDLE_HISTORY` rows.

use serde::{Deserialize, Serialize};

/// Minimum number of candles a series must have before any indicator work is
/// attempted.
pub const MIN_CANDLE_HISTORY: usize = 20;

/// One OHLCV observation for a fixed time bucket.
///
/// OHLC invariants (high >= max(open, close), low <= min(open, close)) are not
/// validated; malformed rows propagate as degenerate indicator values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start, unix seconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// An owned candle sequence sorted ascending by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Normalize raw candles into a time-ascending series.
    ///
    /// Returns `None` when fewer than [`MIN_CANDLE_HISTORY`] rows are
    /// supplied. Callers treat that as a normal outcome — thinly-traded pairs
    /// routinely lack history.
    pub fn new(mut candles: Vec<Candle>) -> Option<Self> {
        if candles.len() < MIN_CANDLE_HISTORY {
            return None;
        }
        candles.sort_by_key(|c| c.time);
        Some(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Always false: the constructor guarantees at least
    /// [`MIN_CANDLE_HISTORY`] rows.
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// The most recent candle. Infallible: the series is never empty.
    pub fn last(&self) -> &Candle {
        &self.candles[self.candles.len() - 1]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.low).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn candle(time: i64, close: f64) -> Candle {
        Candle {
            time,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 100.0,
        }
    }

    #[test]
    fn rejects_short_input() {
        let candles: Vec<Candle> = (0..MIN_CANDLE_HISTORY as i64 - 1)
            .map(|i| candle(i * 60, 100.0))
            .collect();
        assert!(CandleSeries::new(candles).is_none());
        assert!(CandleSeries::new(Vec::new()).is_none());
    }

    #[test]
    fn accepts_exactly_minimum() {
        let candles: Vec<Candle> = (0..MIN_CANDLE_HISTORY as i64)
            .map(|i| candle(i * 60, 100.0))
            .collect();
        let series = CandleSeries::new(candles).unwrap();
        assert_eq!(series.len(), MIN_CANDLE_HISTORY);
    }

    #[test]
    fn sorts_reverse_chronological_input() {
        let reversed: Vec<Candle> = (0..30i64).rev().map(|i| candle(i * 60, i as f64)).collect();
        let series = CandleSeries::new(reversed).unwrap();

        let times: Vec<i64> = series.candles().iter().map(|c| c.time).collect();
        let mut sorted = times.clone();
        sorted.sort_unstable();
        assert_eq!(times, sorted);
        assert_eq!(series.last().close, 29.0);
    }

    #[test]
    fn sort_order_invariance() {
        // Pre-sorted and reverse-sorted input must produce identical series.
        let ascending: Vec<Candle> = (0..30i64).map(|i| candle(i * 60, i as f64)).collect();
        let descending: Vec<Candle> = ascending.iter().rev().copied().collect();

        let a = CandleSeries::new(ascending).unwrap();
        let b = CandleSeries::new(descending).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.closes(), b.closes());
    }

    #[test]
    fn accessors_follow_sorted_order() {
        let candles: Vec<Candle> = (0..25i64).rev().map(|i| candle(i * 60, i as f64)).collect();
        let series = CandleSeries::new(candles).unwrap();
        assert_eq!(series.closes()[0], 0.0);
        assert_eq!(series.highs()[0], 1.0);
        assert_eq!(series.lows()[0], -1.0);
        assert_eq!(series.volumes(), vec![100.0; 25]);
    }
}
