//! Unit tests for MACD indicator

use chrono::{TimeZone, Utc};
use fibscan::indicators::momentum::calculate_macd_series;
use fibscan::models::Candle;

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let ts = Utc.timestamp_opt(1_700_000_000 + i as i64 * 300, 0).unwrap();
            Candle::new(close, close, close, close, ts)
        })
        .collect()
}

#[test]
fn test_macd_insufficient_data() {
    let candles = candles_from_closes(&[1.0; 30]);
    let macd = calculate_macd_series(&candles, 4, 24, 16);
    assert!(macd.iter().all(Option::is_none));
}

#[test]
fn test_macd_defined_from_slow_plus_signal() {
    let candles = candles_from_closes(&vec![1.0; 60]);
    let macd = calculate_macd_series(&candles, 4, 24, 16);

    assert!(macd[..38].iter().all(Option::is_none));
    assert!(macd[38..].iter().all(Option::is_some));
}

#[test]
fn test_macd_flat_prices_are_zero() {
    let candles = candles_from_closes(&vec![1.25; 60]);
    let last = calculate_macd_series(&candles, 4, 24, 16)
        .last()
        .copied()
        .flatten()
        .unwrap();

    assert!(last.macd.abs() < 1e-12);
    assert!(last.signal.abs() < 1e-12);
    assert!(last.histogram.abs() < 1e-12);
}

#[test]
fn test_macd_histogram_sign_follows_acceleration() {
    let rising: Vec<f64> = (0..80)
        .map(|i| if i < 40 { 1.0 } else { 1.0 + 0.0001 * ((i - 39) as f64).powi(2) })
        .collect();
    let falling: Vec<f64> = rising.iter().map(|p| 2.0 - p).collect();

    let up = calculate_macd_series(&candles_from_closes(&rising), 4, 24, 16);
    let down = calculate_macd_series(&candles_from_closes(&falling), 4, 24, 16);

    let up = up.last().copied().flatten().unwrap();
    let down = down.last().copied().flatten().unwrap();
    assert!(up.histogram > 0.0);
    assert!(down.histogram < 0.0);
    assert!((up.histogram - up.macd + up.signal).abs() < 1e-12);
}
