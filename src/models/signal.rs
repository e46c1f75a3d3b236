use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MAX_SCORE: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Buy,
    Sell,
}

impl SignalDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalDirection::Buy => "BUY",
            SignalDirection::Sell => "SELL",
        }
    }
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignalStrength {
    Low,
    Medium,
    High,
}

impl SignalStrength {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= MAX_SCORE => SignalStrength::High,
            2 => SignalStrength::Medium,
            _ => SignalStrength::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignalStrength::Low => "Low",
            SignalStrength::Medium => "Medium",
            SignalStrength::High => "High",
        }
    }
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeLevels {
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    #[error("{direction} levels out of order: stop_loss={stop_loss}, entry={entry_price}, take_profit={take_profit}")]
    InvalidLevels {
        direction: SignalDirection,
        entry_price: f64,
        stop_loss: f64,
        take_profit: f64,
    },
    #[error("stake must be positive, got {0}")]
    NonPositiveStake(f64),
    #[error("stop distance must be positive")]
    ZeroStopDistance,
    #[error("score {0} is outside 0..=3")]
    ScoreOutOfRange(u8),
    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
}

/// A scored trade proposal. Fields are fixed once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    symbol: String,
    direction: SignalDirection,
    entry_price: f64,
    stop_loss: f64,
    take_profit: f64,
    stake: f64,
    score: u8,
    strength: SignalStrength,
    timestamp: DateTime<FixedOffset>,
}

impl Signal {
    pub fn new(
        symbol: impl Into<String>,
        direction: SignalDirection,
        levels: TradeLevels,
        stake: f64,
        score: u8,
        timestamp: DateTime<FixedOffset>,
    ) -> Result<Self, SignalError> {
        let TradeLevels {
            entry_price,
            stop_loss,
            take_profit,
        } = levels;

        for (name, value) in [
            ("entry_price", entry_price),
            ("stop_loss", stop_loss),
            ("take_profit", take_profit),
            ("stake", stake),
        ] {
            if !value.is_finite() {
                return Err(SignalError::NonFinite(name));
            }
        }

        if score > MAX_SCORE {
            return Err(SignalError::ScoreOutOfRange(score));
        }
        if stake <= 0.0 {
            return Err(SignalError::NonPositiveStake(stake));
        }
        if (entry_price - stop_loss).abs() == 0.0 {
            return Err(SignalError::ZeroStopDistance);
        }

        let ordered = match direction {
            SignalDirection::Buy => stop_loss < entry_price && entry_price < take_profit,
            SignalDirection::Sell => take_profit < entry_price && entry_price < stop_loss,
        };
        if !ordered {
            return Err(SignalError::InvalidLevels {
                direction,
                entry_price,
                stop_loss,
                take_profit,
            });
        }

        Ok(Self {
            symbol: symbol.into(),
            direction,
            entry_price,
            stop_loss,
            take_profit,
            stake,
            score,
            strength: SignalStrength::from_score(score),
            timestamp,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn direction(&self) -> SignalDirection {
        self.direction
    }

    pub fn entry_price(&self) -> f64 {
        self.entry_price
    }

    pub fn stop_loss(&self) -> f64 {
        self.stop_loss
    }

    pub fn take_profit(&self) -> f64 {
        self.take_profit
    }

    pub fn stake(&self) -> f64 {
        self.stake
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn strength(&self) -> SignalStrength {
        self.strength
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn stop_distance(&self) -> f64 {
        (self.entry_price - self.stop_loss).abs()
    }

    pub fn to_record(&self) -> SignalRecord {
        SignalRecord {
            symbol: self.symbol.clone(),
            direction: self.direction,
            entry_price: self.entry_price,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
            stake: self.stake,
            score: self.score,
            strength: self.strength,
            timestamp: self.timestamp.to_rfc3339(),
        }
    }
}

/// Flat, serializable shape written to the signal store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub symbol: String,
    pub direction: SignalDirection,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub stake: f64,
    pub score: u8,
    pub strength: SignalStrength,
    pub timestamp: String,
}

/// Outcome of one sweep over the instrument universe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanCycleResult {
    pub best: Option<Signal>,
    pub evaluated: usize,
    pub skipped: usize,
}
