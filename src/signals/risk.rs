//! Stop, target and stake sizing for a scored entry.

use crate::models::{RiskParams, SignalDirection, TradeLevels};

/// Value of one pip for `symbol`: 0.01 for JPY-quoted pairs and gold, else 0.0001.
pub fn pip_value(symbol: &str) -> f64 {
    if symbol.contains("JPY") || symbol.contains("XAUUSD") {
        0.01
    } else {
        0.0001
    }
}

/// Stop size in pips; the first override whose key occurs in `symbol` wins.
pub fn stop_pips(symbol: &str, risk: &RiskParams) -> f64 {
    risk.stop_pip_overrides
        .iter()
        .find(|(key, _)| symbol.contains(key.as_str()))
        .map(|(_, pips)| *pips)
        .unwrap_or(risk.default_stop_pips)
}

pub fn stop_distance(symbol: &str, risk: &RiskParams) -> f64 {
    stop_pips(symbol, risk) * pip_value(symbol)
}

/// Entry, stop-loss and take-profit for a trade entered at `entry_price`.
pub fn trade_levels(
    symbol: &str,
    direction: SignalDirection,
    entry_price: f64,
    risk: &RiskParams,
) -> TradeLevels {
    let distance = stop_distance(symbol, risk);
    let reward = distance * risk.reward_ratio;

    match direction {
        SignalDirection::Buy => TradeLevels {
            entry_price,
            stop_loss: entry_price - distance,
            take_profit: entry_price + reward,
        },
        SignalDirection::Sell => TradeLevels {
            entry_price,
            stop_loss: entry_price + distance,
            take_profit: entry_price - reward,
        },
    }
}

pub fn stake(equity: f64, risk: &RiskParams) -> f64 {
    equity * risk.risk_fraction
}
