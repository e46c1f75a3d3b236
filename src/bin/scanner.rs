//! fibscan Scanner
//!
//! Authenticates with the market data provider once, then runs the scan
//! loop until Ctrl-C. Qualifying signals go to QuestDB when `QUESTDB_URL`
//! is set, otherwise to an in-memory store (dry run).

use dotenvy::dotenv;
use fibscan::config::{self, ScannerConfig};
use fibscan::core::runtime::ScannerRuntime;
use fibscan::core::scheduler::ScanScheduler;
use fibscan::db::{MemorySignalSink, QuestSignalSink, SignalSink};
use fibscan::logging;
use fibscan::services::deriv::DerivMarketDataProvider;
use fibscan::services::market_data::MarketDataProvider;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let environment = config::get_environment();
    logging::init_logging(&environment);

    info!("Starting fibscan scanner");
    info!(environment = %environment, "Environment");

    let config = ScannerConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e
    })?;
    info!(
        symbol_count = config.symbols.len(),
        concurrency = config.concurrency,
        capital = config.capital,
        "Scanning {} symbols",
        config.symbols.len()
    );

    let sink: Arc<dyn SignalSink> = match config.questdb_url.as_deref() {
        Some(url) => {
            info!("Initializing QuestDB connection...");
            let sink = QuestSignalSink::connect(url)
                .await
                .map_err(|e| format!("QuestDB connection required when QUESTDB_URL is set: {}", e))?;
            info!("QuestDB connected");
            Arc::new(sink)
        }
        None => {
            warn!("QUESTDB_URL not set - signals will only be kept in memory");
            Arc::new(MemorySignalSink::new())
        }
    };

    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(DerivMarketDataProvider::new(config.deriv.clone()));

    let scheduler = ScanScheduler::new(provider, sink, config.scan_settings());
    let mut handle = ScannerRuntime::start(scheduler);
    let shutdown = handle.shutdown_token();

    info!("Scanner started, waiting for shutdown signal...");
    let finished = tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down scanner...");
            shutdown.cancel();
            None
        }
        result = handle.wait() => Some(result),
    };

    match finished {
        Some(result) => result?,
        None => handle.wait().await?,
    }

    info!("Scanner stopped");
    Ok(())
}
