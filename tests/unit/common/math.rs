//! Unit tests for rolling-window primitives

use fibscan::common::math::{ema_from_previous, ema_of_defined, ema_series, sma_series};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_sma_series_first_value_at_period_minus_one() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    let sma = sma_series(&values, 3);

    assert_eq!(sma.len(), 5);
    assert!(sma[0].is_none());
    assert!(sma[1].is_none());
    assert_close(sma[2].unwrap(), 2.0);
    assert_close(sma[3].unwrap(), 3.0);
    assert_close(sma[4].unwrap(), 4.0);
}

#[test]
fn test_sma_series_insufficient_data() {
    let sma = sma_series(&[1.0, 2.0], 3);
    assert_eq!(sma, vec![None, None]);
    assert!(sma_series(&[1.0, 2.0], 0).iter().all(Option::is_none));
}

#[test]
fn test_ema_series_seeded_with_sma() {
    let values = [2.0, 4.0, 6.0, 8.0];
    let ema = ema_series(&values, 3);

    assert!(ema[0].is_none());
    assert!(ema[1].is_none());
    assert_close(ema[2].unwrap(), 4.0);
    // alpha = 0.5: 0.5 * 8 + 0.5 * 4
    assert_close(ema[3].unwrap(), 6.0);
}

#[test]
fn test_ema_from_previous() {
    assert_close(ema_from_previous(10.0, 0.0, 1), 10.0);
    assert_close(ema_from_previous(8.0, 4.0, 3), 6.0);
}

#[test]
fn test_ema_of_defined_skips_leading_none() {
    let values = [None, None, Some(1.0), Some(3.0), Some(5.0)];
    let ema = ema_of_defined(&values, 2);

    assert_eq!(ema.len(), 5);
    assert!(ema[..3].iter().all(Option::is_none));
    assert_close(ema[3].unwrap(), 2.0);
    // alpha = 2/3
    assert_close(ema[4].unwrap(), 2.0 / 3.0 * 5.0 + 1.0 / 3.0 * 2.0);
}

#[test]
fn test_ema_of_defined_all_none() {
    let values = [None, None, None];
    assert!(ema_of_defined(&values, 2).iter().all(Option::is_none));
}
