//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::models::Candle;

/// Rolling mean of closes; `None` for the first `period - 1` bars.
pub fn calculate_sma_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::sma_series(&closes, period)
}
