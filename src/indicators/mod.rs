// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators the engine scores
// pairs with. Every function that can be undefined returns `Option<T>` so
// callers are forced to distinguish "no value" from a valid zero.

pub mod ema;
pub mod levels;
pub mod rsi;
pub mod trend;
pub mod volatility;
pub mod volume;
