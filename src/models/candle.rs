use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }
}

/// Candle width in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Granularity(pub u32);

impl Granularity {
    pub const M5: Granularity = Granularity(300);
    pub const H2: Granularity = Granularity(7200);

    pub fn seconds(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0;
        if secs >= 86_400 && secs % 86_400 == 0 {
            write!(f, "{}d", secs / 86_400)
        } else if secs >= 3600 && secs % 3600 == 0 {
            write!(f, "{}h", secs / 3600)
        } else if secs >= 60 && secs % 60 == 0 {
            write!(f, "{}m", secs / 60)
        } else {
            write!(f, "{}s", secs)
        }
    }
}

/// Ordered candles for one symbol and timeframe.
///
/// Construction sorts by timestamp, removes duplicate timestamps (the first
/// bar received for a timestamp wins), drops bars with non-finite prices and
/// keeps only the `limit` most recent bars. The series is read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    symbol: String,
    granularity: Granularity,
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(
        symbol: impl Into<String>,
        granularity: Granularity,
        mut candles: Vec<Candle>,
        limit: usize,
    ) -> Self {
        candles.retain(Candle::is_finite);
        candles.sort_by_key(|c| c.timestamp);
        candles.dedup_by_key(|c| c.timestamp);

        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }

        Self {
            symbol: symbol.into(),
            granularity,
            candles,
        }
    }

    pub fn empty(symbol: impl Into<String>, granularity: Granularity) -> Self {
        Self {
            symbol: symbol.into(),
            granularity,
            candles: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}
