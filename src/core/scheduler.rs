//! Scan-cycle scheduler: sweeps the instrument universe, keeps the best
//! signal and hands qualifying signals to the sink.

use chrono::{DateTime, FixedOffset, Utc};
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::DEFAULT_SYMBOLS;
use crate::core::schedule::ScanSchedule;
use crate::db::SignalSink;
use crate::indicators::{compute_fibonacci_map, compute_indicator_frame};
use crate::models::{ScanCycleResult, Signal, StrategyParams};
use crate::services::market_data::{fetch_candles, MarketDataError, MarketDataProvider};
use crate::signals::{BestSignal, SignalScorer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    Idle,
    Authenticating,
    Scanning,
    Evaluating,
    Persisting,
    Skipping,
    Sleeping,
    Stopped,
    Failed,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("market data authentication failed: {0}")]
    Authentication(#[source] MarketDataError),
    #[error("scanner task failed: {0}")]
    Task(String),
}

/// What one scheduler iteration did.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Blackout,
    NoSignal,
    BelowThreshold(Signal),
    Persisted(Signal),
    SinkFailed(Signal),
}

#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Instruments in scan order; earlier symbols win score ties.
    pub symbols: Vec<String>,
    pub equity: f64,
    /// Symbols fetched in parallel.
    pub concurrency: usize,
    pub schedule: ScanSchedule,
    pub params: StrategyParams,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            equity: 10_000.0,
            concurrency: 4,
            schedule: ScanSchedule::default(),
            params: StrategyParams::default(),
        }
    }
}

enum SymbolOutcome {
    Skipped,
    NoSignal,
    Signal(Signal),
}

pub struct ScanScheduler {
    provider: Arc<dyn MarketDataProvider>,
    sink: Arc<dyn SignalSink>,
    settings: ScanSettings,
    scorer: SignalScorer,
    state: watch::Sender<ScannerState>,
}

impl ScanScheduler {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        sink: Arc<dyn SignalSink>,
        settings: ScanSettings,
    ) -> Self {
        let scorer = SignalScorer::new(settings.params.clone());
        let (state, _) = watch::channel(ScannerState::Idle);
        Self {
            provider,
            sink,
            settings,
            scorer,
            state,
        }
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    pub fn state(&self) -> ScannerState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScannerState> {
        self.state.subscribe()
    }

    fn set_state(&self, state: ScannerState) {
        self.state.send_replace(state);
    }

    /// Authenticate, then scan until `shutdown` is cancelled.
    ///
    /// Returns an error only when authentication fails. Cancellation is
    /// observed while authenticating and during both sleeps.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), ScanError> {
        self.set_state(ScannerState::Authenticating);
        let auth = tokio::select! {
            result = self.provider.authenticate() => result,
            _ = shutdown.cancelled() => {
                info!("Scanner cancelled during authentication");
                self.set_state(ScannerState::Stopped);
                return Ok(());
            }
        };

        if let Err(e) = auth {
            error!(error = %e, "Market data authentication failed, scanner cannot start");
            self.set_state(ScannerState::Failed);
            return Err(ScanError::Authentication(e));
        }

        info!(
            symbol_count = self.settings.symbols.len(),
            "Connection successful. Starting scanner..."
        );

        loop {
            let outcome = self.tick(Utc::now()).await;
            let pause = match outcome {
                CycleOutcome::Blackout => self.settings.schedule.blackout_interval,
                _ => self.settings.schedule.cycle_interval,
            };

            self.set_state(ScannerState::Sleeping);
            debug!(pause_secs = pause.as_secs(), "Waiting for the next cycle");

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(pause) => {}
            }
        }

        info!("Scanner stopped");
        self.set_state(ScannerState::Stopped);
        Ok(())
    }

    /// One iteration at `now`: blackout check, sweep, persistence.
    pub async fn tick(&self, now: DateTime<Utc>) -> CycleOutcome {
        let schedule = &self.settings.schedule;
        let local = schedule.local_time(now);

        if schedule.is_blackout(now) {
            self.set_state(ScannerState::Idle);
            info!(
                local_time = %local.format("%H:%M"),
                "Outside trading hours ({}). Sleeping for {} minutes.",
                local.format("%H:%M"),
                schedule.blackout_interval.as_secs() / 60
            );
            return CycleOutcome::Blackout;
        }

        let result = self.scan(local).await;
        self.finish_cycle(result).await
    }

    /// Sweep every symbol and reduce to the best signal.
    ///
    /// Fetches run concurrently, but results are reduced in scan order.
    pub async fn scan(&self, at: DateTime<FixedOffset>) -> ScanCycleResult {
        self.set_state(ScannerState::Scanning);
        let started = Instant::now();

        let outcomes: Vec<SymbolOutcome> = stream::iter(self.settings.symbols.iter().cloned())
            .map(|symbol| self.evaluate_symbol(symbol, at))
            .buffered(self.settings.concurrency.max(1))
            .collect()
            .await;

        self.set_state(ScannerState::Evaluating);
        let mut best = BestSignal::new();
        for outcome in outcomes {
            match outcome {
                SymbolOutcome::Skipped => best.record_skip(),
                SymbolOutcome::NoSignal => best.record_no_signal(),
                SymbolOutcome::Signal(signal) => {
                    best.offer(signal);
                }
            }
        }

        let result = best.finish();
        info!(
            evaluated = result.evaluated,
            skipped = result.skipped,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Sweep complete"
        );
        result
    }

    async fn finish_cycle(&self, result: ScanCycleResult) -> CycleOutcome {
        let Some(signal) = result.best else {
            info!("No qualifying signal found across all symbols in this cycle.");
            self.set_state(ScannerState::Skipping);
            return CycleOutcome::NoSignal;
        };

        info!(
            symbol = %signal.symbol(),
            direction = %signal.direction(),
            score = signal.score(),
            strength = %signal.strength(),
            "Found Best Signal: [{} SIGNAL] for {} (Score: {}/3) -> {}",
            signal.strength().as_str().to_uppercase(),
            signal.symbol(),
            signal.score(),
            signal.direction()
        );

        if signal.score() < self.settings.params.persist_threshold {
            self.set_state(ScannerState::Skipping);
            return CycleOutcome::BelowThreshold(signal);
        }

        self.set_state(ScannerState::Persisting);
        match self.sink.store_signal(&signal).await {
            Ok(()) => {
                info!(symbol = %signal.symbol(), "High signal for {} saved to database.", signal.symbol());
                CycleOutcome::Persisted(signal)
            }
            Err(e) => {
                error!(symbol = %signal.symbol(), error = %e, "Failed to save signal for {}", signal.symbol());
                CycleOutcome::SinkFailed(signal)
            }
        }
    }

    async fn evaluate_symbol(&self, symbol: String, at: DateTime<FixedOffset>) -> SymbolOutcome {
        let symbol = symbol.as_str();
        let params = &self.settings.params;
        let provider = self.provider.as_ref();

        let (swing, entry) = tokio::join!(
            fetch_candles(provider, symbol, params.swing_granularity, params.swing_count()),
            fetch_candles(provider, symbol, params.entry_granularity, params.entry_count()),
        );

        if swing.is_empty() || entry.is_empty() || entry.len() < params.indicators.ma_long {
            debug!(
                symbol = %symbol,
                swing_bars = swing.len(),
                entry_bars = entry.len(),
                "Skipping {} due to insufficient data.",
                symbol
            );
            return SymbolOutcome::Skipped;
        }

        let Some(fibs) =
            compute_fibonacci_map(&swing, params.fibonacci.lookback, &params.fibonacci.ratios)
        else {
            debug!(symbol = %symbol, swing_bars = swing.len(), "Skipping {}: swing window too short", symbol);
            return SymbolOutcome::Skipped;
        };

        let frame = compute_indicator_frame(&entry, &params.indicators);
        let Some(bar) = frame.latest() else {
            debug!(symbol = %symbol, "Skipping {}: no bar with full indicator history", symbol);
            return SymbolOutcome::Skipped;
        };

        match self.scorer.evaluate(bar, &fibs, self.settings.equity, symbol, at) {
            Some(signal) => SymbolOutcome::Signal(signal),
            None => SymbolOutcome::NoSignal,
        }
    }
}
