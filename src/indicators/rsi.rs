// =============================================================================
// Relative Strength Index (RSI) — simple-moving-average smoothing
// =============================================================================
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — gain = delta if positive else 0, loss = -delta if negative else 0.
// Step 3 — avg_gain / avg_loss = simple mean of the last `window` gains /
//          losses.
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// When avg_loss is zero (monotonically rising or perfectly flat prices) the
// ratio is mathematically undefined and the result is `None` — never a value
// clamped to 100. A strictly falling series yields a valid 0.

/// Default RSI look-back window.
pub const RSI_WINDOW: usize = 14;

/// Compute the RSI at the latest point of `closes`.
///
/// # Edge cases
/// - `window == 0` or fewer than `window + 1` closes => `None`
/// - `avg_loss == 0` => `None` (undefined, not 100)
/// - Non-finite result => `None`
pub fn calculate_rsi(closes: &[f64], window: usize) -> Option<f64> {
    if window == 0 || closes.len() < window + 1 {
        return None;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    let (sum_gain, sum_loss) = deltas[deltas.len() - window..]
        .iter()
        .fold((0.0_f64, 0.0_f64), |(g, l), &d| {
            if d > 0.0 {
                (g + d, l)
            } else {
                (g, l + d.abs())
            }
        });

    let window_f = window as f64;
    let avg_gain = sum_gain / window_f;
    let avg_loss = sum_loss / window_f;

    if avg_loss == 0.0 {
        return None;
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - 100.0 / (1.0 + rs);

    if rsi.is_finite() {
        Some(rsi)
    } else {
        None
    }
}
