//! Operating timezone, nightly blackout window and cycle cadence.

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};
use std::time::Duration;

/// West Africa Time, UTC+01:00 all year.
pub const OPERATING_UTC_OFFSET_SECONDS: i32 = 3600;

/// Local hours `[start_hour, end_hour)` during which no scan runs.
///
/// A window with `start_hour > end_hour` wraps midnight; equal bounds mean
/// no blackout at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlackoutWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl BlackoutWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour: start_hour % 24,
            end_hour: end_hour % 24,
        }
    }

    pub fn none() -> Self {
        Self::new(0, 0)
    }

    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour < self.end_hour {
            (self.start_hour..self.end_hour).contains(&hour)
        } else if self.start_hour > self.end_hour {
            hour >= self.start_hour || hour < self.end_hour
        } else {
            false
        }
    }
}

impl Default for BlackoutWindow {
    fn default() -> Self {
        Self::new(22, 8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSchedule {
    pub timezone: FixedOffset,
    pub blackout: BlackoutWindow,
    /// Pause after a completed sweep.
    pub cycle_interval: Duration,
    /// Pause after finding the clock inside the blackout window.
    pub blackout_interval: Duration,
}

impl ScanSchedule {
    pub fn local_time(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.timezone)
    }

    pub fn is_blackout(&self, now: DateTime<Utc>) -> bool {
        self.blackout.contains(self.local_time(now).hour())
    }
}

impl Default for ScanSchedule {
    fn default() -> Self {
        Self {
            timezone: FixedOffset::east_opt(OPERATING_UTC_OFFSET_SECONDS).unwrap_or(Utc.fix()),
            blackout: BlackoutWindow::default(),
            cycle_interval: Duration::from_secs(300),
            blackout_interval: Duration::from_secs(300),
        }
    }
}
