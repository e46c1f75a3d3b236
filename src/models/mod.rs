//! Shared data models spanning the engine layers.

pub mod candle;
pub mod indicators;
pub mod signal;
pub mod strategy;

pub use candle::{Candle, CandleSeries, Granularity};
pub use indicators::{FibonacciLevel, FibonacciMap, IndicatorBar, IndicatorFrame, MacdIndicator};
pub use signal::{
    ScanCycleResult, Signal, SignalDirection, SignalError, SignalRecord, SignalStrength,
    TradeLevels,
};
pub use strategy::{FibonacciParams, IndicatorParams, RiskParams, StrategyParams};
