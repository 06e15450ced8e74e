// =============================================================================
// Coinbase Exchange collaborator
// =============================================================================
//
// Concrete implementation of the market-data and catalog traits against the
// public Coinbase Exchange REST API, with request pacing built in.

pub mod client;
pub mod rate_limit;

pub use client::CoinbaseClient;
pub use rate_limit::RequestPacer;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::market_data::{Candle, MarketDataSource, PairCatalog};
use crate::types::PairStats;

#[async_trait]
impl MarketDataSource for CoinbaseClient {
    async fn fetch_candles(
        &self,
        pair: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        granularity_secs: u32,
    ) -> Result<Option<Vec<Candle>>> {
        self.get_candles(pair, start, end, granularity_secs).await
    }
}

#[async_trait]
impl PairCatalog for CoinbaseClient {
    async fn list_pairs(&self) -> Result<Vec<String>> {
        self.get_products().await
    }

    async fn fetch_stats(&self, pair: &str) -> Result<Option<PairStats>> {
        self.get_stats(pair).await
    }
}
