//! fibscan: a periodic market scanner that scores instruments against
//! Fibonacci retracement levels and trend indicators and records the single
//! best high-confidence signal of each cycle.

pub mod common;
pub mod config;
pub mod core;
pub mod db;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;
