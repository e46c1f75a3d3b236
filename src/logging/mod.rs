//! Tracing subscriber setup.
//!
//! Production emits one JSON object per event for log shipping; every other
//! environment gets colored, human-readable lines.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn for_environment(environment: &str) -> Self {
        if is_production(environment) {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

pub fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_logging(environment: &str) {
    let format = LogFormat::for_environment(environment);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = (format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_current_span(false)
            .with_file(true)
            .with_line_number(true)
    });
    let pretty = (format == LogFormat::Pretty).then(|| {
        fmt::layer()
            .with_ansi(true)
            .with_file(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();
}
