// =============================================================================
// Opportunity scanner — catalog sweep with threshold triggers
// =============================================================================
//
// Walks the full pair catalog in catalog order, filters by quote currency and
// minimum 24h volume (before any candle fetch), runs a single 7-day hourly
// indicator pass per surviving pair, and collects the pairs whose latest
// values cross the configured trigger thresholds.
//
// The scan never fails: per-pair problems (missing stats, thin history,
// transport errors) are logged and skipped. Results are not ranked.
//
// Request spacing against the remote source is owned by the market-data
// collaborator's pacer, not by this loop.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analyzer::IndicatorSnapshot;
use crate::indicators::rsi::{calculate_rsi, RSI_WINDOW};
use crate::indicators::volatility::{volatility_series, VOLATILITY_WINDOW};
use crate::indicators::volume::{calculate_volume_trend, VOLUME_WINDOW};
use crate::market_data::{CandleSeries, MarketDataSource, PairCatalog};
use crate::types::Timeframe;

/// RSI below this reads as oversold.
pub const OVERSOLD_RSI: f64 = 30.0;
/// Volume-trend ratio above this reads as unusual activity.
pub const HIGH_VOLUME_RATIO: f64 = 2.0;

/// The closed set of trigger conditions a scan evaluates.
///
/// An undefined indicator value never fires its trigger: `false` here means
/// "condition not met or not computable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TriggerConditions {
    /// Latest RSI below [`OVERSOLD_RSI`].
    pub oversold: bool,
    /// Latest volume-trend ratio above [`HIGH_VOLUME_RATIO`].
    pub high_volume: bool,
    /// Latest volatility above the series' mean volatility.
    pub increasing_volatility: bool,
}

impl TriggerConditions {
    /// True when at least one trigger fired.
    pub fn any(&self) -> bool {
        self.oversold || self.high_volume || self.increasing_volatility
    }

    /// Names of the triggers that fired.
    pub fn active(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.oversold {
            names.push("oversold");
        }
        if self.high_volume {
            names.push("high_volume");
        }
        if self.increasing_volatility {
            names.push("increasing_volatility");
        }
        names
    }
}

/// One pair that crossed at least one trigger threshold during a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub pair: String,
    /// Close of the latest candle in the scanned series.
    pub price: f64,
    pub volume_24h: f64,
    pub triggers: TriggerConditions,
    /// Raw indicator values behind the triggers, kept for display.
    pub snapshot: IndicatorSnapshot,
}

/// Sweeps the pair catalog for trigger-crossing pairs.
pub struct OpportunityScanner<C, M> {
    catalog: Arc<C>,
    market: Arc<M>,
    quote_suffix: String,
}

impl<C, M> OpportunityScanner<C, M>
where
    C: PairCatalog,
    M: MarketDataSource,
{
    pub fn new(catalog: Arc<C>, market: Arc<M>, quote_suffix: impl Into<String>) -> Self {
        Self {
            catalog,
            market,
            quote_suffix: quote_suffix.into(),
        }
    }

    /// Scan every catalog pair quoted in the configured currency whose 24h
    /// volume reaches `min_volume`. Returns the opportunities in catalog
    /// order; an empty vector is a normal result.
    pub async fn scan(&self, min_volume: f64) -> Vec<Opportunity> {
        let pairs = match self.catalog.list_pairs().await {
            Ok(pairs) => pairs,
            Err(e) => {
                warn!(error = %e, "pair catalog unavailable — nothing to scan");
                return Vec::new();
            }
        };

        info!(total = pairs.len(), min_volume, "starting opportunity scan");

        let mut opportunities = Vec::new();
        for pair in &pairs {
            if !pair.ends_with(&self.quote_suffix) {
                continue;
            }
            if let Some(opportunity) = self.scan_pair(pair, min_volume).await {
                opportunities.push(opportunity);
            }
        }

        info!(found = opportunities.len(), "opportunity scan complete");
        opportunities
    }

    /// Evaluate one pair; `None` means skipped or no trigger fired.
    async fn scan_pair(&self, pair: &str, min_volume: f64) -> Option<Opportunity> {
        let stats = match self.catalog.fetch_stats(pair).await {
            Ok(Some(stats)) => stats,
            Ok(None) => {
                debug!(pair, "no stats — skipped");
                return None;
            }
            Err(e) => {
                warn!(pair, error = %e, "stats fetch failed — skipped");
                return None;
            }
        };

        // Volume gate comes before any candle fetch.
        if stats.volume_24h < min_volume {
            debug!(pair, volume_24h = stats.volume_24h, "below minimum volume — skipped");
            return None;
        }

        let timeframe = Timeframe::MediumTerm;
        let end = Utc::now();
        let raw = match self
            .market
            .fetch_candles(pair, end - timeframe.window(), end, timeframe.granularity_secs())
            .await
        {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(pair, "no candle history — skipped");
                return None;
            }
            Err(e) => {
                warn!(pair, error = %e, "candle fetch failed — skipped");
                return None;
            }
        };

        let series = match CandleSeries::new(raw) {
            Some(series) => series,
            None => {
                debug!(pair, "candle history too short — skipped");
                return None;
            }
        };

        let closes = series.closes();
        let volumes = series.volumes();

        let rsi = calculate_rsi(&closes, RSI_WINDOW);
        let volume_trend = calculate_volume_trend(&volumes, VOLUME_WINDOW);
        let vol_series = volatility_series(&closes, VOLATILITY_WINDOW);
        let volatility = vol_series.last().copied();
        let mean_volatility = if vol_series.is_empty() {
            None
        } else {
            Some(vol_series.iter().sum::<f64>() / vol_series.len() as f64)
        };

        let triggers = TriggerConditions {
            oversold: rsi.is_some_and(|r| r < OVERSOLD_RSI),
            high_volume: volume_trend.is_some_and(|v| v > HIGH_VOLUME_RATIO),
            increasing_volatility: matches!(
                (volatility, mean_volatility),
                (Some(latest), Some(mean)) if latest > mean
            ),
        };

        if !triggers.any() {
            return None;
        }

        info!(pair, signals = ?triggers.active(), "opportunity found");

        Some(Opportunity {
            pair: pair.to_string(),
            price: series.last().close,
            volume_24h: stats.volume_24h,
            triggers,
            snapshot: IndicatorSnapshot {
                rsi,
                volume_trend,
                volatility,
            },
        })
    }
}
