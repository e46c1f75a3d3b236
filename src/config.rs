//! Environment-driven configuration.

use std::env;
use thiserror::Error;

use crate::core::scheduler::ScanSettings;
use crate::services::deriv::DerivSettings;

/// Instrument universe in scan order.
pub const DEFAULT_SYMBOLS: [&str; 37] = [
    "frxEURUSD", "frxGBPUSD", "frxUSDJPY", "frxAUDUSD", "frxNZDUSD", "frxUSDCAD",
    "frxUSDCHF", "frxGBPJPY", "frxEURGBP", "frxEURJPY", "frxEURCHF", "frxAUDJPY",
    "frxAUDCAD", "frxAUDCHF", "frxAUDNZD", "frxNZDJPY", "frxGBPCHF", "frxGBPAUD",
    "frxGBPNZD", "frxXAUUSD", "R_10", "R_25", "R_50", "R_75", "R_100", "1HZ10V",
    "1HZ25V", "1HZ50V", "1HZ75V", "1HZ100V", "1HZ150V", "1HZ250V", "JD10", "JD25",
    "JD50", "JD75", "JD100",
];

pub const DEFAULT_CAPITAL: f64 = 10_000.0;
pub const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Deployment environment from `APP_ENV`, defaulting to `sandbox`.
///
/// Read on its own so logging can be set up before the rest of the
/// configuration is validated.
pub fn get_environment() -> String {
    environment_from(|key| env::var(key).ok())
}

pub fn environment_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("APP_ENV")
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub environment: String,
    pub deriv: DerivSettings,
    pub capital: f64,
    pub symbols: Vec<String>,
    pub concurrency: usize,
    pub questdb_url: Option<String>,
}

impl ScannerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let token = get("DERIV_TOKEN").ok_or(ConfigError::Missing("DERIV_TOKEN"))?;
        let mut deriv = DerivSettings::new(token);
        if let Some(app_id) = get("DERIV_APP_ID") {
            deriv.app_id = app_id;
        }
        if let Some(endpoint) = get("DERIV_WS_URL") {
            deriv.endpoint = endpoint;
        }

        let capital = match get("CAPITAL") {
            Some(raw) => raw.parse::<f64>().map_err(|e| ConfigError::Invalid {
                name: "CAPITAL",
                reason: e.to_string(),
            })?,
            None => DEFAULT_CAPITAL,
        };
        if !capital.is_finite() || capital <= 0.0 {
            return Err(ConfigError::Invalid {
                name: "CAPITAL",
                reason: format!("must be a positive amount, got {}", capital),
            });
        }

        let symbols: Vec<String> = match get("SCAN_SYMBOLS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        };
        if symbols.is_empty() {
            return Err(ConfigError::Invalid {
                name: "SCAN_SYMBOLS",
                reason: "no symbols listed".to_string(),
            });
        }

        let concurrency = match get("SCAN_CONCURRENCY") {
            Some(raw) => raw.parse::<usize>().map_err(|e| ConfigError::Invalid {
                name: "SCAN_CONCURRENCY",
                reason: e.to_string(),
            })?,
            None => DEFAULT_CONCURRENCY,
        };
        if concurrency == 0 {
            return Err(ConfigError::Invalid {
                name: "SCAN_CONCURRENCY",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            environment: environment_from(&lookup),
            deriv,
            capital,
            symbols,
            concurrency,
            questdb_url: get("QUESTDB_URL"),
        })
    }

    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings {
            symbols: self.symbols.clone(),
            equity: self.capital,
            concurrency: self.concurrency,
            ..ScanSettings::default()
        }
    }
}
