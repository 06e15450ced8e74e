// =============================================================================
// Market data collaborators
// =============================================================================
//
// The engine never talks to an exchange directly: the analyzer and scanner
// take these traits as injected dependencies, so any data source (live REST
// client, replay fixture, test mock) can stand behind them.
//
// `Ok(None)` means the collaborator has no usable data for the request — a
// normal outcome, distinct from a transport error (`Err`).

pub mod series;

pub use series::{Candle, CandleSeries, MIN_CANDLE_HISTORY};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::types::PairStats;

/// Source of historical OHLCV candles for a trading pair.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch candles for `pair` covering `[start, end]` at the given bucket
    /// width. Ordering of the returned rows is unspecified; callers normalize
    /// through [`CandleSeries`].
    async fn fetch_candles(
        &self,
        pair: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        granularity_secs: u32,
    ) -> Result<Option<Vec<Candle>>>;
}

/// Catalog of known tradable pairs and their latest 24h stats.
#[async_trait]
pub trait PairCatalog: Send + Sync {
    /// All known pair identifiers (e.g. "BTC-USD").
    async fn list_pairs(&self) -> Result<Vec<String>>;

    /// Latest 24h stats for one pair, or `None` when the catalog has none.
    async fn fetch_stats(&self, pair: &str) -> Result<Option<PairStats>>;
}
