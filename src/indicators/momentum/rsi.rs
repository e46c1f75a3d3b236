//! RSI (Relative Strength Index) indicator
//!
//! RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss.
//! Averages are seeded with the simple mean of the first `period` changes and
//! then Wilder-smoothed. The first value lands at index `period`.

use crate::models::Candle;

/// RSI for every bar; `None` until `period` price changes are available.
pub fn calculate_rsi_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; candles.len()];
    if period == 0 || candles.len() < period + 1 {
        return result;
    }

    let changes: Vec<f64> = candles.windows(2).map(|w| w[1].close - w[0].close).collect();

    let (mut avg_gain, mut avg_loss) = changes[..period]
        .iter()
        .fold((0.0, 0.0), |(gain, loss), &change| {
            if change > 0.0 {
                (gain + change, loss)
            } else {
                (gain, loss - change)
            }
        });
    avg_gain /= period as f64;
    avg_loss /= period as f64;
    result[period] = Some(rsi_value(avg_gain, avg_loss));

    let alpha = 1.0 / period as f64;
    for (i, &change) in changes.iter().enumerate().skip(period) {
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
        avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;
        result[i + 1] = Some(rsi_value(avg_gain, avg_loss));
    }

    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
