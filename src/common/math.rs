//! Rolling-window primitives over price vectors.
//!
//! Series functions return one slot per input value; slots without a full
//! window are `None`.

/// One EMA step from the previous EMA value.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let alpha = 2.0 / (period as f64 + 1.0);
    alpha * value + (1.0 - alpha) * previous
}

/// Rolling simple moving average. The first value lands at `period - 1`.
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return result;
    }

    for (offset, window) in values.windows(period).enumerate() {
        result[offset + period - 1] = Some(window.iter().sum::<f64>() / period as f64);
    }
    result
}

/// Exponential moving average seeded with the SMA of the first `period` values.
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return result;
    }

    let seed = values[..period].iter().sum::<f64>() / period as f64;
    let mut previous = seed;
    result[period - 1] = Some(seed);
    for (i, &value) in values.iter().enumerate().skip(period) {
        previous = ema_from_previous(value, previous, period);
        result[i] = Some(previous);
    }
    result
}

/// EMA over a series that itself has a `None` prefix (e.g. a MACD line).
///
/// The defined tail must be contiguous; the EMA starts on its first value.
pub fn ema_of_defined(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let start = values.iter().position(Option::is_some).unwrap_or(values.len());
    let tail: Vec<f64> = values[start..].iter().map_while(|v| *v).collect();

    let mut result = vec![None; values.len()];
    for (offset, value) in ema_series(&tail, period).into_iter().enumerate() {
        result[start + offset] = value;
    }
    result
}
