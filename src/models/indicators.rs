use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candle::{Candle, Granularity};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// One entry-timeframe bar with its full indicator history available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBar {
    pub candle: Candle,
    pub ma_long: f64,
    pub ma_short: f64,
    pub rsi: f64,
    pub sma: f64,
    pub macd: MacdIndicator,
}

impl IndicatorBar {
    pub fn close(&self) -> f64 {
        self.candle.close
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.candle.timestamp
    }
}

/// Indicator-augmented entry series. Leading warm-up bars are not present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFrame {
    pub symbol: String,
    pub granularity: Granularity,
    pub bars: Vec<IndicatorBar>,
}

impl IndicatorFrame {
    pub fn latest(&self) -> Option<&IndicatorBar> {
        self.bars.last()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevel {
    pub ratio: f64,
    pub price: f64,
}

/// Retracement levels between a swing low and high.
///
/// Levels keep the order they were built in, which is the order the scorer
/// tests them: configured ratios first, then the 0.0 and 1.0 endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciMap {
    swing_low: f64,
    swing_high: f64,
    levels: Vec<FibonacciLevel>,
}

impl FibonacciMap {
    pub fn new(swing_low: f64, swing_high: f64, ratios: &[f64]) -> Self {
        let range = swing_high - swing_low;
        let mut levels: Vec<FibonacciLevel> = ratios
            .iter()
            .filter(|&&r| r != 0.0 && r != 1.0)
            .map(|&ratio| FibonacciLevel {
                ratio,
                price: (swing_low + ratio * range).max(swing_low).min(swing_high),
            })
            .collect();

        levels.push(FibonacciLevel {
            ratio: 0.0,
            price: swing_low,
        });
        levels.push(FibonacciLevel {
            ratio: 1.0,
            price: swing_high,
        });

        Self {
            swing_low,
            swing_high,
            levels,
        }
    }

    pub fn swing_low(&self) -> f64 {
        self.swing_low
    }

    pub fn swing_high(&self) -> f64 {
        self.swing_high
    }

    pub fn levels(&self) -> &[FibonacciLevel] {
        &self.levels
    }

    pub fn price_at(&self, ratio: f64) -> Option<f64> {
        self.levels
            .iter()
            .find(|level| level.ratio == ratio)
            .map(|level| level.price)
    }
}
