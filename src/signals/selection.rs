//! Best-signal reduction over one sweep.

use crate::models::{ScanCycleResult, Signal};

/// Keeps the highest-scoring signal offered so far.
///
/// A candidate replaces the current best only with a strictly greater score,
/// so among equal scores the first one offered wins. Offer candidates in scan
/// order to make the outcome independent of fetch completion order.
#[derive(Debug, Default)]
pub struct BestSignal {
    best: Option<Signal>,
    evaluated: usize,
    skipped: usize,
}

impl BestSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `candidate` became the new best.
    pub fn offer(&mut self, candidate: Signal) -> bool {
        self.evaluated += 1;
        let replace = match &self.best {
            Some(current) => candidate.score() > current.score(),
            None => true,
        };
        if replace {
            self.best = Some(candidate);
        }
        replace
    }

    /// Record a symbol that was evaluated without producing a signal.
    pub fn record_no_signal(&mut self) {
        self.evaluated += 1;
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn finish(self) -> ScanCycleResult {
        ScanCycleResult {
            best: self.best,
            evaluated: self.evaluated,
            skipped: self.skipped,
        }
    }
}
