//! Signal scoring and per-cycle selection.

pub mod risk;
pub mod scoring;
pub mod selection;

pub use scoring::SignalScorer;
pub use selection::BestSignal;
