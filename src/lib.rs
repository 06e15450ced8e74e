//! Indicator and opportunity-scan engine for crypto pairs.
//!
//! The engine ingests time-ordered OHLCV candles for tradable pairs and
//! derives a fixed set of technical indicators (RSI, EMA-crossover momentum,
//! directional trend strength, support/resistance bands, volatility, and a
//! volume-trend ratio). Two query surfaces sit on top:
//!
//! - [`analyzer::PairAnalyzer::analyze`] scores one pair across three
//!   timeframes (24h / 7d / 30d).
//! - [`scanner::OpportunityScanner::scan`] sweeps the pair catalog for pairs
//!   whose latest values cross the configured trigger thresholds.
//!
//! Market data and the pair catalog are injected through the traits in
//! [`market_data`]; [`coinbase::CoinbaseClient`] is the production
//! implementation.

pub mod analyzer;
pub mod coinbase;
pub mod config;
pub mod errors;
pub mod indicators;
pub mod market_data;
pub mod scanner;
pub mod types;
