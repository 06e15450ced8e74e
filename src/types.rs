// =============================================================================
// Shared types used across the analysis engine
// =============================================================================

use serde::{Deserialize, Serialize};

/// 24-hour rolling stats for a single trading pair, as reported by the pair
/// catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairStats {
    /// Last traded price.
    pub last: f64,
    /// Base-currency volume over the last 24 hours.
    pub volume_24h: f64,
    /// 24-hour high.
    pub high_24h: f64,
    /// 24-hour low.
    pub low_24h: f64,
    /// 24-hour price change in percent.
    pub price_change_pct_24h: f64,
}

/// Direction of a momentum or trend reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Bullish,
    Bearish,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
        }
    }
}

/// The three analysis windows a pair is scored on.
///
/// Each timeframe fixes both the look-back window and the candle granularity
/// requested from the market data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    /// Last 24 hours, 5-minute candles.
    ShortTerm,
    /// Last 7 days, 1-hour candles.
    MediumTerm,
    /// Last 30 days, 1-day candles.
    LongTerm,
}

impl Timeframe {
    /// All timeframes in short-to-long order.
    pub const ALL: [Timeframe; 3] = [Self::ShortTerm, Self::MediumTerm, Self::LongTerm];

    /// Look-back window covered by this timeframe.
    pub fn window(&self) -> chrono::Duration {
        match self {
            Self::ShortTerm => chrono::Duration::days(1),
            Self::MediumTerm => chrono::Duration::days(7),
            Self::LongTerm => chrono::Duration::days(30),
        }
    }

    /// Candle bucket width in seconds.
    pub fn granularity_secs(&self) -> u32 {
        match self {
            Self::ShortTerm => 300,
            Self::MediumTerm => 3600,
            Self::LongTerm => 86_400,
        }
    }

    /// Stable snake_case label, matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ShortTerm => "short_term",
            Self::MediumTerm => "medium_term",
            Self::LongTerm => "long_term",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
