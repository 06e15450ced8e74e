// =============================================================================
// Pair analyzer — three-timeframe indicator analysis for a single pair
// =============================================================================
//
// `analyze` fetches the short (24h/5m), medium (7d/1h), and long (30d/1d)
// candle series for one pair, scores each with an indicator snapshot, and
// derives momentum, trend strength, and the support/resistance band from the
// long series. The operation is all-or-nothing: missing stats or any missing
// timeframe fails the whole analysis, and no partial record is produced.
//
// Collaborators are injected; the analyzer holds no global state and every
// analysis record is built fresh, never cached.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AnalysisError;
use crate::indicators::ema::{calculate_momentum, Momentum};
use crate::indicators::levels::{calculate_support_resistance, PriceBand, LEVELS_LOOKBACK};
use crate::indicators::rsi::{calculate_rsi, RSI_WINDOW};
use crate::indicators::trend::{calculate_trend_strength, TrendStrength, TREND_WINDOW};
use crate::indicators::volatility::{calculate_volatility, VOLATILITY_WINDOW};
use crate::indicators::volume::{calculate_volume_trend, VOLUME_WINDOW};
use crate::market_data::{CandleSeries, MarketDataSource, PairCatalog};
use crate::types::{PairStats, Timeframe};

/// Indicator values at the latest point of one timeframe's series.
///
/// `None` marks an undefined value (insufficient window or a degenerate
/// ratio) — never conflated with a valid zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: Option<f64>,
    pub volume_trend: Option<f64>,
    pub volatility: Option<f64>,
}

impl IndicatorSnapshot {
    /// Compute the snapshot at the latest point of `series`.
    pub fn from_series(series: &CandleSeries) -> Self {
        let closes = series.closes();
        let volumes = series.volumes();
        Self {
            rsi: calculate_rsi(&closes, RSI_WINDOW),
            volume_trend: calculate_volume_trend(&volumes, VOLUME_WINDOW),
            volatility: calculate_volatility(&closes, VOLATILITY_WINDOW),
        }
    }
}

/// Complete analysis record for one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairAnalysis {
    pub pair: String,
    /// Close of the most recent short-term candle.
    pub current_price: f64,
    pub volume_24h: f64,
    pub stats: PairStats,
    pub short_term: IndicatorSnapshot,
    pub medium_term: IndicatorSnapshot,
    pub long_term: IndicatorSnapshot,
    /// EMA20/EMA50 momentum on the long series.
    pub momentum: Option<Momentum>,
    /// Directional-movement trend strength on the long series.
    pub trend: Option<TrendStrength>,
    /// Support/resistance band on the long series.
    pub levels: Option<PriceBand>,
}

/// Runs single-pair analyses against injected collaborators.
pub struct PairAnalyzer<C, M> {
    catalog: Arc<C>,
    market: Arc<M>,
    recommended: Vec<String>,
}

impl<C, M> PairAnalyzer<C, M>
where
    C: PairCatalog,
    M: MarketDataSource,
{
    pub fn new(catalog: Arc<C>, market: Arc<M>, recommended: Vec<String>) -> Self {
        Self {
            catalog,
            market,
            recommended,
        }
    }

    /// Analyze one pair across all three timeframes.
    pub async fn analyze(&self, pair: &str) -> Result<PairAnalysis, AnalysisError> {
        let stats = match self.catalog.fetch_stats(pair).await {
            Ok(Some(stats)) => stats,
            Ok(None) => {
                return Err(AnalysisError::NoStats { pair: pair.into() });
            }
            Err(e) => {
                warn!(pair, error = %e, "stats fetch failed");
                return Err(AnalysisError::NoStats { pair: pair.into() });
            }
        };

        let end = Utc::now();
        let short = self.fetch_series(pair, Timeframe::ShortTerm, end).await?;
        let medium = self.fetch_series(pair, Timeframe::MediumTerm, end).await?;
        let long = self.fetch_series(pair, Timeframe::LongTerm, end).await?;

        let long_closes = long.closes();

        let analysis = PairAnalysis {
            pair: pair.to_string(),
            current_price: short.last().close,
            volume_24h: stats.volume_24h,
            short_term: IndicatorSnapshot::from_series(&short),
            medium_term: IndicatorSnapshot::from_series(&medium),
            long_term: IndicatorSnapshot::from_series(&long),
            momentum: calculate_momentum(&long_closes),
            trend: calculate_trend_strength(long.candles(), TREND_WINDOW),
            levels: calculate_support_resistance(long.candles(), LEVELS_LOOKBACK),
            stats,
        };

        debug!(pair, price = analysis.current_price, "pair analysis complete");
        Ok(analysis)
    }

    /// Analyze the configured recommended pairs, skipping failures.
    pub async fn analyze_recommended(&self) -> Vec<PairAnalysis> {
        let mut analyses = Vec::with_capacity(self.recommended.len());
        for pair in &self.recommended {
            match self.analyze(pair).await {
                Ok(analysis) => analyses.push(analysis),
                Err(e) => warn!(pair = pair.as_str(), error = %e, "recommended pair skipped"),
            }
        }
        analyses
    }

    /// Fetch and normalize one timeframe's series.
    async fn fetch_series(
        &self,
        pair: &str,
        timeframe: Timeframe,
        end: DateTime<Utc>,
    ) -> Result<CandleSeries, AnalysisError> {
        let start = end - timeframe.window();

        let insufficient = || AnalysisError::InsufficientHistory {
            pair: pair.into(),
            timeframe,
        };

        let raw = match self
            .market
            .fetch_candles(pair, start, end, timeframe.granularity_secs())
            .await
        {
            Ok(Some(raw)) => raw,
            Ok(None) => return Err(insufficient()),
            Err(e) => {
                warn!(pair, %timeframe, error = %e, "candle fetch failed");
                return Err(insufficient());
            }
        };

        CandleSeries::new(raw).ok_or_else(insufficient)
    }
}
