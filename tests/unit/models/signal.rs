//! Unit tests for signal construction and validation

use chrono::{DateTime, FixedOffset, TimeZone};
use fibscan::models::{Signal, SignalDirection, SignalError, SignalStrength, TradeLevels};

fn local_time() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 4, 12, 0, 0)
        .unwrap()
}

fn buy_levels() -> TradeLevels {
    TradeLevels {
        entry_price: 1.1382,
        stop_loss: 1.1322,
        take_profit: 1.1562,
    }
}

#[test]
fn test_valid_buy_signal() {
    let signal = Signal::new("frxEURUSD", SignalDirection::Buy, buy_levels(), 200.0, 3, local_time()).unwrap();

    assert_eq!(signal.symbol(), "frxEURUSD");
    assert_eq!(signal.strength(), SignalStrength::High);
    assert!((signal.stop_distance() - 0.006).abs() < 1e-9);
}

#[test]
fn test_valid_sell_signal() {
    let levels = TradeLevels {
        entry_price: 1.1618,
        stop_loss: 1.1678,
        take_profit: 1.1438,
    };
    let signal = Signal::new("frxEURUSD", SignalDirection::Sell, levels, 200.0, 2, local_time()).unwrap();
    assert_eq!(signal.strength(), SignalStrength::Medium);
}

#[test]
fn test_buy_levels_out_of_order_rejected() {
    let levels = TradeLevels {
        entry_price: 1.1382,
        stop_loss: 1.1562,
        take_profit: 1.1322,
    };
    let err = Signal::new("frxEURUSD", SignalDirection::Buy, levels, 200.0, 3, local_time()).unwrap_err();
    assert!(matches!(err, SignalError::InvalidLevels { direction: SignalDirection::Buy, .. }));
}

#[test]
fn test_sell_with_buy_levels_rejected() {
    let err = Signal::new("frxEURUSD", SignalDirection::Sell, buy_levels(), 200.0, 3, local_time()).unwrap_err();
    assert!(matches!(err, SignalError::InvalidLevels { .. }));
}

#[test]
fn test_non_positive_stake_rejected() {
    let err = Signal::new("frxEURUSD", SignalDirection::Buy, buy_levels(), 0.0, 3, local_time()).unwrap_err();
    assert_eq!(err, SignalError::NonPositiveStake(0.0));
}

#[test]
fn test_zero_stop_distance_rejected() {
    let levels = TradeLevels {
        entry_price: 1.1382,
        stop_loss: 1.1382,
        take_profit: 1.1562,
    };
    let err = Signal::new("frxEURUSD", SignalDirection::Buy, levels, 200.0, 3, local_time()).unwrap_err();
    assert_eq!(err, SignalError::ZeroStopDistance);
}

#[test]
fn test_score_out_of_range_rejected() {
    let err = Signal::new("frxEURUSD", SignalDirection::Buy, buy_levels(), 200.0, 4, local_time()).unwrap_err();
    assert_eq!(err, SignalError::ScoreOutOfRange(4));
}

#[test]
fn test_non_finite_price_rejected() {
    let levels = TradeLevels {
        entry_price: f64::NAN,
        ..buy_levels()
    };
    let err = Signal::new("frxEURUSD", SignalDirection::Buy, levels, 200.0, 3, local_time()).unwrap_err();
    assert_eq!(err, SignalError::NonFinite("entry_price"));
}

#[test]
fn test_strength_from_score() {
    assert_eq!(SignalStrength::from_score(0), SignalStrength::Low);
    assert_eq!(SignalStrength::from_score(1), SignalStrength::Low);
    assert_eq!(SignalStrength::from_score(2), SignalStrength::Medium);
    assert_eq!(SignalStrength::from_score(3), SignalStrength::High);
}

#[test]
fn test_record_serialization() {
    let signal = Signal::new("frxEURUSD", SignalDirection::Buy, buy_levels(), 200.0, 3, local_time()).unwrap();
    let json = serde_json::to_value(signal.to_record()).unwrap();

    assert_eq!(json["symbol"], "frxEURUSD");
    assert_eq!(json["direction"], "BUY");
    assert_eq!(json["strength"], "High");
    assert_eq!(json["score"], 3);
    assert_eq!(json["timestamp"], "2024-03-04T12:00:00+01:00");
}
