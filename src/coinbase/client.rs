// =============================================================================
// Coinbase Exchange REST API client — public market data endpoints
// =============================================================================
//
// Every endpoint used here is public; no request signing is involved. All
// calls go through the shared RequestPacer so that catalog sweeps stay under
// the exchange's courtesy rate limit.
//
// Unavailable data (non-2xx responses, malformed payloads, thin history) is
// reported as `Ok(None)` with a warning — an expected outcome the callers
// skip over. Only transport-level failures surface as `Err`.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, instrument, warn};

use crate::coinbase::rate_limit::RequestPacer;
use crate::market_data::Candle;
use crate::types::PairStats;

/// Production Coinbase Exchange API host.
const COINBASE_API_URL: &str = "https://api.exchange.coinbase.com";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// REST client for Coinbase Exchange public market data.
#[derive(Debug)]
pub struct CoinbaseClient {
    base_url: String,
    client: reqwest::Client,
    pacer: RequestPacer,
}

impl CoinbaseClient {
    /// Create a client that spaces outbound requests by at least
    /// `min_interval`.
    pub fn new(min_interval: Duration) -> Self {
        let mut default_headers = HeaderMap::new();
        // Coinbase rejects requests without a User-Agent.
        default_headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(concat!("crypto-squeeze/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build reqwest client");

        debug!(base_url = COINBASE_API_URL, "CoinbaseClient initialised");

        Self {
            base_url: COINBASE_API_URL.to_string(),
            client,
            pacer: RequestPacer::new(min_interval),
        }
    }

    // -------------------------------------------------------------------------
    // Products / catalog
    // -------------------------------------------------------------------------

    /// GET /products — all known trading pair identifiers.
    ///
    /// Catalog entries without an `id` field are dropped.
    #[instrument(skip(self), name = "coinbase::get_products")]
    pub async fn get_products(&self) -> Result<Vec<String>> {
        self.pacer.acquire().await;

        let url = format!("{}/products", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /products request failed")?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse products response")?;

        if !status.is_success() {
            anyhow::bail!("Coinbase GET /products returned {}: {}", status, body);
        }

        let raw = body.as_array().context("products response is not an array")?;

        let pairs: Vec<String> = raw
            .iter()
            .filter_map(|p| p["id"].as_str())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();

        debug!(count = pairs.len(), "products fetched");
        Ok(pairs)
    }

    /// GET /products/{id}/stats — 24h stats for one pair.
    #[instrument(skip(self), name = "coinbase::get_stats")]
    pub async fn get_stats(&self, pair: &str) -> Result<Option<PairStats>> {
        self.pacer.acquire().await;

        let url = format!("{}/products/{}/stats", self.base_url, pair);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /products/{id}/stats request failed")?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse stats response")?;

        if !status.is_success() {
            warn!(pair, %status, "stats unavailable");
            return Ok(None);
        }

        match parse_stats(&body) {
            Ok(stats) => Ok(Some(stats)),
            Err(e) => {
                warn!(pair, error = %e, "malformed stats payload");
                Ok(None)
            }
        }
    }

    /// GET /products/{id}/candles — historical OHLCV rows.
    ///
    /// Wire rows are `[time, low, high, open, close, volume]`; malformed rows
    /// are skipped with a warning.
    #[instrument(skip(self, start, end), name = "coinbase::get_candles")]
    pub async fn get_candles(
        &self,
        pair: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        granularity_secs: u32,
    ) -> Result<Option<Vec<Candle>>> {
        self.pacer.acquire().await;

        let url = format!("{}/products/{}/candles", self.base_url, pair);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("start", start.to_rfc3339()),
                ("end", end.to_rfc3339()),
                ("granularity", granularity_secs.to_string()),
            ])
            .send()
            .await
            .context("GET /products/{id}/candles request failed")?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse candles response")?;

        if !status.is_success() {
            warn!(pair, %status, "candles unavailable");
            return Ok(None);
        }

        let candles = match parse_candles(&body) {
            Some(candles) => candles,
            None => {
                warn!(pair, "candles response is not an array");
                return Ok(None);
            }
        };

        debug!(pair, granularity_secs, count = candles.len(), "candles fetched");
        Ok(Some(candles))
    }
}

// =============================================================================
// Payload parsing
// =============================================================================

/// Parse a stats payload.
///
/// Coinbase reports numeric values as JSON strings. The payload carries no
/// change field, so the 24h change percent is derived from `open` and `last`
/// (0 when `open` is zero or absent).
fn parse_stats(body: &serde_json::Value) -> Result<PairStats> {
    let last = parse_str_f64(&body["last"]).context("stats field 'last'")?;
    let volume_24h = parse_str_f64(&body["volume"]).context("stats field 'volume'")?;
    let high_24h = parse_str_f64(&body["high"]).context("stats field 'high'")?;
    let low_24h = parse_str_f64(&body["low"]).context("stats field 'low'")?;

    let open = parse_str_f64(&body["open"]).unwrap_or(0.0);
    let price_change_pct_24h = if open != 0.0 {
        (last - open) / open * 100.0
    } else {
        0.0
    };

    Ok(PairStats {
        last,
        volume_24h,
        high_24h,
        low_24h,
        price_change_pct_24h,
    })
}

/// Parse a candles payload: an array of `[time, low, high, open, close,
/// volume]` rows. Returns `None` when the payload is not an array.
fn parse_candles(body: &serde_json::Value) -> Option<Vec<Candle>> {
    let raw = body.as_array()?;

    let mut candles = Vec::with_capacity(raw.len());
    for entry in raw {
        match parse_candle_row(entry) {
            Ok(candle) => candles.push(candle),
            Err(e) => warn!(error = %e, "skipping malformed candle row"),
        }
    }
    Some(candles)
}

fn parse_candle_row(entry: &serde_json::Value) -> Result<Candle> {
    let row = entry.as_array().context("candle row is not an array")?;
    if row.len() < 6 {
        anyhow::bail!("candle row has {} elements, expected 6", row.len());
    }

    Ok(Candle {
        time: row[0].as_i64().context("candle field 'time'")?,
        low: parse_str_f64(&row[1]).context("candle field 'low'")?,
        high: parse_str_f64(&row[2]).context("candle field 'high'")?,
        open: parse_str_f64(&row[3]).context("candle field 'open'")?,
        close: parse_str_f64(&row[4]).context("candle field 'close'")?,
        volume: parse_str_f64(&row[5]).context("candle field 'volume'")?,
    })
}

/// Parse a JSON value that may be either a string or a number into `f64`.
fn parse_str_f64(val: &serde_json::Value) -> Result<f64> {
    if let Some(s) = val.as_str() {
        s.parse::<f64>()
            .with_context(|| format!("failed to parse '{s}' as f64"))
    } else if let Some(n) = val.as_f64() {
        Ok(n)
    } else {
        anyhow::bail!("expected string or number, got: {val}")
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stats_string_payload() {
        let body = serde_json::json!({
            "open": "25000.00",
            "high": "26500.00",
            "low": "24800.00",
            "volume": "1234.56",
            "last": "26000.00",
            "volume_30day": "98765.43"
        });
        let stats = parse_stats(&body).unwrap();
        assert!((stats.last - 26_000.0).abs() < 1e-9);
        assert!((stats.volume_24h - 1234.56).abs() < 1e-9);
        assert!((stats.high_24h - 26_500.0).abs() < 1e-9);
        assert!((stats.low_24h - 24_800.0).abs() < 1e-9);
        assert!((stats.price_change_pct_24h - 4.0).abs() < 1e-9);
    }

    #[test]
    fn parse_stats_missing_open_defaults_change_to_zero() {
        let body = serde_json::json!({
            "high": "2.0",
            "low": "1.0",
            "volume": "10.0",
            "last": "1.5"
        });
        let stats = parse_stats(&body).unwrap();
        assert_eq!(stats.price_change_pct_24h, 0.0);
    }

    #[test]
    fn parse_stats_missing_last_is_error() {
        let body = serde_json::json!({ "volume": "10.0", "high": "2.0", "low": "1.0" });
        assert!(parse_stats(&body).is_err());
    }

    #[test]
    fn parse_candles_wire_order() {
        // Wire order is [time, low, high, open, close, volume].
        let body = serde_json::json!([
            [1700000000, 99.0, 101.0, 100.0, 100.5, 12.5],
            [1699996400, 98.0, 100.0, 99.5, 99.0, 8.0]
        ]);
        let candles = parse_candles(&body).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].time, 1_700_000_000);
        assert!((candles[0].low - 99.0).abs() < 1e-9);
        assert!((candles[0].high - 101.0).abs() < 1e-9);
        assert!((candles[0].open - 100.0).abs() < 1e-9);
        assert!((candles[0].close - 100.5).abs() < 1e-9);
        assert!((candles[0].volume - 12.5).abs() < 1e-9);
    }

    #[test]
    fn parse_candles_skips_malformed_rows() {
        let body = serde_json::json!([
            [1700000000, 99.0, 101.0, 100.0, 100.5, 12.5],
            [1700003600, 99.0],
            "not a row"
        ]);
        let candles = parse_candles(&body).unwrap();
        assert_eq!(candles.len(), 1);
    }

    #[test]
    fn parse_candles_non_array_is_none() {
        let body = serde_json::json!({ "message": "NotFound" });
        assert!(parse_candles(&body).is_none());
    }

    #[test]
    fn parse_str_f64_accepts_both_forms() {
        assert!((parse_str_f64(&serde_json::json!("1.5")).unwrap() - 1.5).abs() < 1e-12);
        assert!((parse_str_f64(&serde_json::json!(2.5)).unwrap() - 2.5).abs() < 1e-12);
        assert!(parse_str_f64(&serde_json::json!(null)).is_err());
        assert!(parse_str_f64(&serde_json::json!("abc")).is_err());
    }
}
