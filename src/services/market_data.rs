//! Market data provider interface and the per-cycle fetch wrapper.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

use crate::models::{Candle, CandleSeries, Granularity};

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("provider error {code}: {message}")]
    Api { code: String, message: String },
    #[error("malformed response: {0}")]
    Protocol(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("session closed")]
    SessionClosed,
}

impl MarketDataError {
    pub fn is_authentication(&self) -> bool {
        matches!(self, MarketDataError::Authentication(_))
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Establish the authenticated session. Called once before scanning.
    async fn authenticate(&self) -> Result<(), MarketDataError>;

    /// Get up to `count` historical candles for a symbol, in any order.
    async fn get_candles(
        &self,
        symbol: &str,
        granularity: Granularity,
        count: usize,
    ) -> Result<Vec<Candle>, MarketDataError>;
}

/// Fetch a normalized candle series. Provider failures are logged and
/// produce an empty series so the caller can skip the symbol this cycle.
pub async fn fetch_candles(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    granularity: Granularity,
    count: usize,
) -> CandleSeries {
    match provider.get_candles(symbol, granularity, count).await {
        Ok(candles) => {
            let series = CandleSeries::new(symbol, granularity, candles, count);
            if series.is_empty() {
                debug!(symbol = %symbol, granularity = %granularity, "No candles returned for {}", symbol);
            }
            series
        }
        Err(e) => {
            error!(
                symbol = %symbol,
                granularity = %granularity,
                error = %e,
                "Failed to fetch {} candles for {}",
                granularity,
                symbol
            );
            CandleSeries::empty(symbol, granularity)
        }
    }
}
