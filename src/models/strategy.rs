//! Fixed strategy constants: indicator windows, Fibonacci settings and risk sizing.

use serde::{Deserialize, Serialize};

use super::candle::Granularity;

/// Indicator window lengths for the entry timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub ma_long: usize,
    pub ma_short: usize,
    pub rsi_period: usize,
    pub sma_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl IndicatorParams {
    /// Number of leading bars that lack a full window for at least one indicator.
    pub fn warmup(&self) -> usize {
        [
            self.ma_long.saturating_sub(1),
            self.ma_short.saturating_sub(1),
            self.rsi_period,
            self.sma_period.saturating_sub(1),
            (self.macd_slow + self.macd_signal).saturating_sub(2),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ma_long: 200,
            ma_short: 20,
            rsi_period: 16,
            sma_period: 16,
            macd_fast: 4,
            macd_slow: 24,
            macd_signal: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciParams {
    /// Interior retracement ratios, tested in this order before the 0.0/1.0 endpoints.
    pub ratios: Vec<f64>,
    /// Swing-timeframe bars used for the high/low anchors.
    pub lookback: usize,
    /// Relative distance to a level that counts as "at" the level.
    pub tolerance: f64,
}

impl Default for FibonacciParams {
    fn default() -> Self {
        Self {
            ratios: vec![0.382, 0.5, 0.618],
            lookback: 50,
            tolerance: 0.015,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskParams {
    pub risk_fraction: f64,
    pub reward_ratio: f64,
    pub default_stop_pips: f64,
    /// Symbol fragments with their own stop size, matched by substring in order.
    pub stop_pip_overrides: Vec<(String, f64)>,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            risk_fraction: 0.02,
            reward_ratio: 3.0,
            default_stop_pips: 60.0,
            stop_pip_overrides: vec![("XAUUSD".to_string(), 100.0)],
        }
    }
}

/// Everything the scanner needs to turn two candle series into a signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyParams {
    pub indicators: IndicatorParams,
    pub fibonacci: FibonacciParams,
    pub risk: RiskParams,
    pub rsi_midpoint: f64,
    pub swing_granularity: Granularity,
    pub entry_granularity: Granularity,
    /// Entry bars requested beyond the long moving average window.
    pub entry_history_margin: usize,
    /// Minimum score a cycle's best signal needs to be stored.
    pub persist_threshold: u8,
}

impl StrategyParams {
    pub fn swing_count(&self) -> usize {
        self.fibonacci.lookback
    }

    pub fn entry_count(&self) -> usize {
        self.indicators.ma_long + self.entry_history_margin
    }
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            indicators: IndicatorParams::default(),
            fibonacci: FibonacciParams::default(),
            risk: RiskParams::default(),
            rsi_midpoint: 50.0,
            swing_granularity: Granularity::H2,
            entry_granularity: Granularity::M5,
            entry_history_margin: 50,
            persist_threshold: 3,
        }
    }
}
