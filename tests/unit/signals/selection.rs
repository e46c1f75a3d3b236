//! Unit tests for best-signal selection

use chrono::{FixedOffset, TimeZone};
use fibscan::models::{Signal, SignalDirection, TradeLevels};
use fibscan::signals::BestSignal;

fn signal(symbol: &str, score: u8) -> Signal {
    let at = FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 4, 12, 0, 0)
        .unwrap();
    let levels = TradeLevels {
        entry_price: 1.0,
        stop_loss: 0.99,
        take_profit: 1.03,
    };
    Signal::new(symbol, SignalDirection::Buy, levels, 200.0, score, at).unwrap()
}

#[test]
fn test_empty_selection() {
    let result = BestSignal::new().finish();
    assert!(result.best.is_none());
    assert_eq!(result.evaluated, 0);
    assert_eq!(result.skipped, 0);
}

#[test]
fn test_higher_score_replaces() {
    let mut best = BestSignal::new();
    assert!(best.offer(signal("A", 2)));
    assert!(best.offer(signal("B", 3)));
    assert_eq!(best.finish().best.unwrap().symbol(), "B");
}

#[test]
fn test_tie_keeps_first() {
    let mut best = BestSignal::new();
    assert!(best.offer(signal("A", 3)));
    assert!(!best.offer(signal("B", 3)));
    assert_eq!(best.finish().best.unwrap().symbol(), "A");
}

#[test]
fn test_lower_score_ignored() {
    let mut best = BestSignal::new();
    best.offer(signal("A", 3));
    assert!(!best.offer(signal("B", 2)));
    assert_eq!(best.finish().best.unwrap().symbol(), "A");
}

#[test]
fn test_counts() {
    let mut best = BestSignal::new();
    best.offer(signal("A", 2));
    best.record_no_signal();
    best.record_skip();
    best.record_skip();

    let result = best.finish();
    assert_eq!(result.evaluated, 2);
    assert_eq!(result.skipped, 2);
}
