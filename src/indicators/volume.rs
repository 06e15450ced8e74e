// =============================================================================
// Volume trend — latest volume relative to its rolling average
// =============================================================================
//
// ratio = current volume / SMA(volume, window)
//
// A ratio above 1 means the latest bucket traded more than its recent
// average; the scanner flags ratios above 2 as unusual activity.

/// Default rolling window for the volume SMA.
pub const VOLUME_WINDOW: usize = 20;

/// Ratio of the latest volume to the simple moving average of the last
/// `window` volumes (the latest bucket included).
///
/// Returns `None` when fewer than `window` rows are available or the average
/// is zero.
pub fn calculate_volume_trend(volumes: &[f64], window: usize) -> Option<f64> {
    if window == 0 || volumes.len() < window {
        return None;
    }

    let sma = volumes[volumes.len() - window..].iter().sum::<f64>() / window as f64;
    if sma == 0.0 {
        return None;
    }

    let ratio = volumes[volumes.len() - 1] / sma;
    if ratio.is_finite() {
        Some(ratio)
    } else {
        None
    }
}
