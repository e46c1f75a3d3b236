//! Supervised lifecycle for the scan loop.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::core::scheduler::{ScanError, ScanScheduler, ScannerState};

pub struct ScannerRuntime;

impl ScannerRuntime {
    /// Spawn the scheduler as the process's single scan task.
    pub fn start(scheduler: ScanScheduler) -> ScannerHandle {
        let shutdown = CancellationToken::new();
        let state = scheduler.subscribe();
        let token = shutdown.clone();

        let task = tokio::spawn(async move { scheduler.run(token).await });
        info!("ScannerRuntime: scan task started");

        ScannerHandle {
            shutdown,
            state,
            task: Some(task),
        }
    }
}

/// Control surface for a running scanner.
///
/// `wait` is the error channel: it resolves with the task's result, which is
/// an error when authentication failed or the task panicked. The result is
/// delivered once; later calls to `wait` or `stop` return `Ok(())`.
pub struct ScannerHandle {
    shutdown: CancellationToken,
    state: watch::Receiver<ScannerState>,
    task: Option<JoinHandle<Result<(), ScanError>>>,
}

impl ScannerHandle {
    pub fn state(&self) -> ScannerState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScannerState> {
        self.state.clone()
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the scan task to end.
    pub async fn wait(&mut self) -> Result<(), ScanError> {
        let Some(task) = self.task.as_mut() else {
            return Ok(());
        };
        let joined = task.await;
        self.task = None;
        match joined {
            Ok(result) => result,
            Err(e) => Err(ScanError::Task(e.to_string())),
        }
    }

    /// Request a graceful stop and wait for the task to finish.
    pub async fn stop(mut self) -> Result<(), ScanError> {
        self.shutdown.cancel();
        let result = self.wait().await;
        info!("ScannerRuntime: stopped");
        result
    }
}
