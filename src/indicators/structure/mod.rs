//! Market structure: Fibonacci retracements

pub mod fibonacci;

pub use fibonacci::*;
