//! MACD (Moving Average Convergence Divergence) indicator
//!
//! MACD = EMA(fast) - EMA(slow)
//! Signal = EMA(signal) of MACD
//! Histogram = MACD - Signal

use crate::common::math;
use crate::models::{Candle, MacdIndicator};

/// MACD for every bar; defined from index `slow + signal - 2` onwards.
pub fn calculate_macd_series(
    candles: &[Candle],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Vec<Option<MacdIndicator>> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let fast_ema = math::ema_series(&closes, fast_period);
    let slow_ema = math::ema_series(&closes, slow_period);

    let macd_line: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(fast, slow)| Some((*fast)? - (*slow)?))
        .collect();
    let signal_line = math::ema_of_defined(&macd_line, signal_period);

    macd_line
        .iter()
        .zip(&signal_line)
        .map(|(macd, signal)| {
            let (macd, signal) = ((*macd)?, (*signal)?);
            Some(MacdIndicator {
                macd,
                signal,
                histogram: macd - signal,
            })
        })
        .collect()
}
