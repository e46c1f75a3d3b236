//! Fibonacci retracement levels anchored on a swing high/low.

use crate::models::{CandleSeries, FibonacciMap};

/// Build the retracement map from the last `lookback` bars of the swing series.
///
/// Returns `None` when the series is shorter than `lookback`.
pub fn compute_fibonacci_map(
    swing: &CandleSeries,
    lookback: usize,
    ratios: &[f64],
) -> Option<FibonacciMap> {
    if lookback == 0 || swing.len() < lookback {
        return None;
    }

    let window = &swing.candles()[swing.len() - lookback..];
    let high = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);

    Some(FibonacciMap::new(low, high, ratios))
}
