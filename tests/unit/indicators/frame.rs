//! Unit tests for the entry-timeframe indicator frame

use chrono::{TimeZone, Utc};
use fibscan::indicators::compute_indicator_frame;
use fibscan::models::{Candle, CandleSeries, Granularity, IndicatorParams};

fn entry_series(count: usize) -> CandleSeries {
    let candles = (0..count)
        .map(|i| {
            let ts = Utc.timestamp_opt(1_700_000_000 + i as i64 * 300, 0).unwrap();
            let close = 1.10 + (i as f64 * 0.3).sin() * 0.002 + i as f64 * 0.00001;
            Candle::new(close, close + 0.0005, close - 0.0005, close, ts)
        })
        .collect();
    CandleSeries::new("frxEURUSD", Granularity::M5, candles, count)
}

#[test]
fn test_warmup_is_long_ma_window() {
    assert_eq!(IndicatorParams::default().warmup(), 199);
}

#[test]
fn test_frame_empty_below_long_ma_window() {
    let frame = compute_indicator_frame(&entry_series(199), &IndicatorParams::default());
    assert!(frame.is_empty());
    assert!(frame.latest().is_none());
}

#[test]
fn test_frame_drops_warmup_bars() {
    let params = IndicatorParams::default();
    let series = entry_series(250);
    let frame = compute_indicator_frame(&series, &params);

    assert_eq!(frame.len(), 250 - params.warmup());
    assert_eq!(frame.bars[0].timestamp(), series.candles()[199].timestamp);
    assert_eq!(frame.latest().unwrap().close(), series.last().unwrap().close);
    assert_eq!(frame.symbol, "frxEURUSD");
    assert_eq!(frame.granularity, Granularity::M5);
}

#[test]
fn test_frame_single_bar_at_exact_window() {
    let frame = compute_indicator_frame(&entry_series(200), &IndicatorParams::default());
    assert_eq!(frame.len(), 1);
}

#[test]
fn test_frame_values_are_finite() {
    let frame = compute_indicator_frame(&entry_series(250), &IndicatorParams::default());
    for bar in &frame.bars {
        assert!(bar.ma_long.is_finite());
        assert!(bar.ma_short.is_finite());
        assert!(bar.sma.is_finite());
        assert!((0.0..=100.0).contains(&bar.rsi));
        assert!(bar.macd.histogram.is_finite());
    }
}

#[test]
fn test_frame_is_deterministic() {
    let series = entry_series(250);
    let params = IndicatorParams::default();
    let first = compute_indicator_frame(&series, &params);
    let second = compute_indicator_frame(&series, &params);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.bars.iter().zip(&second.bars) {
        assert_eq!(a.ma_long.to_bits(), b.ma_long.to_bits());
        assert_eq!(a.rsi.to_bits(), b.rsi.to_bits());
        assert_eq!(a.macd.histogram.to_bits(), b.macd.histogram.to_bits());
    }
}
