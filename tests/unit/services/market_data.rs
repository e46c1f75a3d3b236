//! Unit tests for the candle fetch wrapper

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use fibscan::models::{Candle, Granularity};
use fibscan::services::market_data::{fetch_candles, MarketDataError, MarketDataProvider};

struct FixedProvider {
    candles: Result<Vec<Candle>, String>,
}

#[async_trait]
impl MarketDataProvider for FixedProvider {
    async fn authenticate(&self) -> Result<(), MarketDataError> {
        Ok(())
    }

    async fn get_candles(
        &self,
        _symbol: &str,
        _granularity: Granularity,
        _count: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        self.candles
            .clone()
            .map_err(|message| MarketDataError::Api {
                code: "MarketIsClosed".to_string(),
                message,
            })
    }
}

fn candle(i: i64, close: f64) -> Candle {
    let ts = Utc.timestamp_opt(1_700_000_000 + i * 7200, 0).unwrap();
    Candle::new(close, close, close, close, ts)
}

#[tokio::test]
async fn test_fetch_normalizes_provider_output() {
    let provider = FixedProvider {
        candles: Ok(vec![candle(3, 4.0), candle(1, 2.0), candle(2, 3.0), candle(1, 7.0), candle(0, 1.0)]),
    };

    let series = fetch_candles(&provider, "frxEURUSD", Granularity::H2, 3).await;

    assert_eq!(series.symbol(), "frxEURUSD");
    assert_eq!(series.granularity(), Granularity::H2);
    assert_eq!(series.closes(), vec![2.0, 3.0, 4.0]);
}

#[tokio::test]
async fn test_fetch_error_yields_empty_series() {
    let provider = FixedProvider {
        candles: Err("market closed".to_string()),
    };

    let series = fetch_candles(&provider, "frxEURUSD", Granularity::M5, 250).await;
    assert!(series.is_empty());
}

#[test]
fn test_authentication_errors_are_flagged() {
    assert!(MarketDataError::Authentication("bad token".to_string()).is_authentication());
    assert!(!MarketDataError::SessionClosed.is_authentication());
    assert!(!MarketDataError::Connection("refused".to_string()).is_authentication());
}
