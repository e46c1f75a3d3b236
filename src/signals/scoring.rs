//! Rule-based scoring of the latest entry bar against the retracement map.
//!
//! One point for price sitting at a Fibonacci level, one for a MACD/RSI
//! trend agreeing on a direction, one for price on the trend side of the
//! long moving average.

use chrono::{DateTime, FixedOffset};
use tracing::{debug, warn};

use crate::models::{
    FibonacciLevel, FibonacciMap, IndicatorBar, Signal, SignalDirection, StrategyParams,
};
use crate::signals::risk;

/// Find the first level (in map order) within `tolerance` of `price`.
pub fn match_level(price: f64, fibs: &FibonacciMap, tolerance: f64) -> Option<FibonacciLevel> {
    fibs.levels()
        .iter()
        .filter(|level| level.price > 0.0)
        .find(|level| (price - level.price).abs() / level.price < tolerance)
        .copied()
}

/// Direction implied by the MACD histogram and RSI, if they agree.
pub fn trend_direction(bar: &IndicatorBar, rsi_midpoint: f64) -> Option<SignalDirection> {
    let histogram = bar.macd.histogram;
    if histogram > 0.0 && bar.rsi > rsi_midpoint {
        Some(SignalDirection::Buy)
    } else if histogram < 0.0 && bar.rsi < rsi_midpoint {
        Some(SignalDirection::Sell)
    } else {
        None
    }
}

/// Whether price sits on the `direction` side of the long moving average.
pub fn confirms_trend(bar: &IndicatorBar, direction: SignalDirection) -> bool {
    match direction {
        SignalDirection::Buy => bar.close() > bar.ma_long,
        SignalDirection::Sell => bar.close() < bar.ma_long,
    }
}

pub struct SignalScorer {
    params: StrategyParams,
}

impl SignalScorer {
    pub fn new(params: StrategyParams) -> Self {
        Self { params }
    }

    /// Score `bar` and build a trade proposal stamped with `at`.
    ///
    /// Returns `None` when price is not at any level or the trend test
    /// yields no direction.
    pub fn evaluate(
        &self,
        bar: &IndicatorBar,
        fibs: &FibonacciMap,
        equity: f64,
        symbol: &str,
        at: DateTime<FixedOffset>,
    ) -> Option<Signal> {
        let price = bar.close();
        let level = match_level(price, fibs, self.params.fibonacci.tolerance)?;
        let direction = trend_direction(bar, self.params.rsi_midpoint)?;

        let mut score = 2;
        if confirms_trend(bar, direction) {
            score += 1;
        }

        debug!(
            symbol = %symbol,
            level = level.ratio,
            level_price = level.price,
            direction = %direction,
            score = score,
            "Level {} matched for {} ({} score {})",
            level.ratio,
            symbol,
            direction,
            score
        );

        let levels = risk::trade_levels(symbol, direction, price, &self.params.risk);
        let stake = risk::stake(equity, &self.params.risk);

        match Signal::new(symbol, direction, levels, stake, score, at) {
            Ok(signal) => Some(signal),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Discarding invalid signal for {}", symbol);
                None
            }
        }
    }
}
