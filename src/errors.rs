// =============================================================================
// Core failure taxonomy
// =============================================================================
//
// A single-pair analysis is all-or-nothing: it either produces a complete
// record or fails with one of the variants below. Missing data is an expected
// outcome for thinly-traded pairs, not an exceptional condition, so callers
// iterating many pairs log these and move on.

use crate::types::Timeframe;

/// Why a pair analysis could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The pair catalog has no 24h stats for the pair.
    #[error("no 24h stats available for {pair}")]
    NoStats { pair: String },

    /// One of the required candle series is unavailable or shorter than the
    /// minimum history.
    #[error("insufficient candle history for {pair} on the {timeframe} timeframe")]
    InsufficientHistory { pair: String, timeframe: Timeframe },
}
