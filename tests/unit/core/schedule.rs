//! Unit tests for the operating schedule

use chrono::{TimeZone, Timelike, Utc};
use fibscan::core::schedule::{BlackoutWindow, ScanSchedule};
use std::time::Duration;

#[test]
fn test_default_blackout_wraps_midnight() {
    let window = BlackoutWindow::default();

    assert!(window.contains(22));
    assert!(window.contains(23));
    assert!(window.contains(0));
    assert!(window.contains(7));
    assert!(!window.contains(8));
    assert!(!window.contains(12));
    assert!(!window.contains(21));
}

#[test]
fn test_daytime_window() {
    let window = BlackoutWindow::new(12, 14);
    assert!(window.contains(12));
    assert!(window.contains(13));
    assert!(!window.contains(14));
    assert!(!window.contains(11));
}

#[test]
fn test_empty_window() {
    let window = BlackoutWindow::none();
    assert!((0..24).all(|hour| !window.contains(hour)));
}

#[test]
fn test_schedule_uses_utc_plus_one() {
    let schedule = ScanSchedule::default();
    let now = Utc.with_ymd_and_hms(2024, 3, 4, 11, 0, 0).unwrap();

    let local = schedule.local_time(now);
    assert_eq!(local.hour(), 12);
    assert_eq!(local.offset().local_minus_utc(), 3600);
    assert_eq!(schedule.cycle_interval, Duration::from_secs(300));
    assert_eq!(schedule.blackout_interval, Duration::from_secs(300));
}

#[test]
fn test_blackout_evaluated_in_local_time() {
    let schedule = ScanSchedule::default();

    // 21:30 UTC is 22:30 local
    assert!(schedule.is_blackout(Utc.with_ymd_and_hms(2024, 3, 4, 21, 30, 0).unwrap()));
    // 06:59 UTC is 07:59 local
    assert!(schedule.is_blackout(Utc.with_ymd_and_hms(2024, 3, 4, 6, 59, 0).unwrap()));
    // 07:00 UTC is 08:00 local
    assert!(!schedule.is_blackout(Utc.with_ymd_and_hms(2024, 3, 4, 7, 0, 0).unwrap()));
    // 20:59 UTC is 21:59 local
    assert!(!schedule.is_blackout(Utc.with_ymd_and_hms(2024, 3, 4, 20, 59, 0).unwrap()));
}
