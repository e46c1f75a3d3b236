//! Indicator frame for the entry timeframe.

use crate::indicators::momentum::{calculate_macd_series, calculate_rsi_series};
use crate::indicators::trend::calculate_sma_series;
use crate::models::{CandleSeries, IndicatorBar, IndicatorFrame, IndicatorParams};

/// Augment every bar of `series` with its indicators, keeping only bars where
/// all of them are defined.
pub fn compute_indicator_frame(series: &CandleSeries, params: &IndicatorParams) -> IndicatorFrame {
    let candles = series.candles();

    let ma_long = calculate_sma_series(candles, params.ma_long);
    let ma_short = calculate_sma_series(candles, params.ma_short);
    let rsi = calculate_rsi_series(candles, params.rsi_period);
    let sma = calculate_sma_series(candles, params.sma_period);
    let macd = calculate_macd_series(
        candles,
        params.macd_fast,
        params.macd_slow,
        params.macd_signal,
    );

    let bars = candles
        .iter()
        .enumerate()
        .filter_map(|(i, candle)| {
            Some(IndicatorBar {
                candle: *candle,
                ma_long: ma_long[i]?,
                ma_short: ma_short[i]?,
                rsi: rsi[i]?,
                sma: sma[i]?,
                macd: macd[i]?,
            })
        })
        .collect();

    IndicatorFrame {
        symbol: series.symbol().to_string(),
        granularity: series.granularity(),
        bars,
    }
}
