//! Indicator engine: pure functions from candle series to indicator values.

pub mod frame;
pub mod momentum;
pub mod structure;
pub mod trend;

pub use frame::compute_indicator_frame;
pub use structure::compute_fibonacci_map;
