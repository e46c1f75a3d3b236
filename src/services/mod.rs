//! External services: market data providers.

pub mod deriv;
pub mod market_data;

pub use deriv::{DerivMarketDataProvider, DerivSettings};
pub use market_data::{fetch_candles, MarketDataError, MarketDataProvider};
