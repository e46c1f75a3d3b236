//! Deriv market data provider (WebSocket JSON API).

pub mod client;
pub mod messages;
pub mod provider;

pub use client::{DerivClient, DerivSettings, DEFAULT_ENDPOINT};
pub use provider::DerivMarketDataProvider;
