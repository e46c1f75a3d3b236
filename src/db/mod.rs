//! Signal persistence.

pub mod questdb;
pub mod sink;

pub use questdb::QuestSignalSink;
pub use sink::{MemorySignalSink, SignalSink, SinkError};
