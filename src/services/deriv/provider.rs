//! Deriv implementation of `MarketDataProvider`.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use super::client::{DerivClient, DerivSettings};
use super::messages::{CandleData, CandlesResponse, TicksHistoryRequest};
use crate::models::{Candle, Granularity};
use crate::services::market_data::{MarketDataError, MarketDataProvider};

pub struct DerivMarketDataProvider {
    client: DerivClient,
}

impl DerivMarketDataProvider {
    pub fn new(settings: DerivSettings) -> Self {
        Self {
            client: DerivClient::new(settings),
        }
    }

    pub fn client(&self) -> &DerivClient {
        &self.client
    }
}

#[async_trait]
impl MarketDataProvider for DerivMarketDataProvider {
    async fn authenticate(&self) -> Result<(), MarketDataError> {
        info!(app_id = %self.client.settings().app_id, "Connecting to Deriv API...");
        self.client.authorize().await.map_err(|e| match e {
            MarketDataError::Authentication(_) => e,
            other => MarketDataError::Authentication(other.to_string()),
        })
    }

    async fn get_candles(
        &self,
        symbol: &str,
        granularity: Granularity,
        count: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let end = Utc::now().timestamp();
        let reply = self
            .client
            .request(|req_id| {
                TicksHistoryRequest::candles(symbol, granularity.seconds(), count, end, req_id)
            })
            .await?;

        let response: CandlesResponse = serde_json::from_value(reply)
            .map_err(|e| MarketDataError::Protocol(format!("invalid candles payload: {}", e)))?;

        Ok(response
            .candles
            .iter()
            .filter_map(CandleData::to_candle)
            .collect())
    }
}
