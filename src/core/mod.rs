//! Core application primitives: schedule, scan loop and its runtime.

pub mod runtime;
pub mod schedule;
pub mod scheduler;

pub use runtime::*;
pub use schedule::*;
pub use scheduler::*;
