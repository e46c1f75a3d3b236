//! Deriv WebSocket API request and response shapes.

use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::Candle;

#[derive(Debug, Serialize)]
pub struct AuthorizeRequest<'a> {
    pub authorize: &'a str,
    pub req_id: u64,
}

#[derive(Debug, Serialize)]
pub struct TicksHistoryRequest<'a> {
    pub ticks_history: &'a str,
    pub style: &'static str,
    pub granularity: u32,
    pub count: usize,
    pub end: String,
    pub adjust_start_time: u8,
    pub req_id: u64,
}

impl<'a> TicksHistoryRequest<'a> {
    pub fn candles(symbol: &'a str, granularity: u32, count: usize, end_epoch: i64, req_id: u64) -> Self {
        Self {
            ticks_history: symbol,
            style: "candles",
            granularity,
            count,
            end: end_epoch.to_string(),
            adjust_start_time: 1,
            req_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Fields shared by every reply envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub msg_type: Option<String>,
    #[serde(default)]
    pub req_id: Option<u64>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct CandlesResponse {
    #[serde(default)]
    pub candles: Vec<CandleData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandleData {
    #[serde(deserialize_with = "number_or_string")]
    pub epoch: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub open: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub high: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub low: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub close: f64,
}

impl CandleData {
    pub fn to_candle(&self) -> Option<Candle> {
        let timestamp = DateTime::from_timestamp(self.epoch as i64, 0)?;
        Some(Candle::new(self.open, self.high, self.low, self.close, timestamp))
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
