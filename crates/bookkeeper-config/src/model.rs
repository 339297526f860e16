use std::{env, path::PathBuf};

use bookkeeper_core::ReportOptions;
use bookkeeper_domain::DEFAULT_TAX_RATE;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the application home directory.
pub const HOME_ENV: &str = "BOOKKEEPER_HOME";
const DEFAULT_DIR_NAME: &str = ".bookkeeper";
const DATA_DIR: &str = "data";

/// Stores data location and report behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory holding `invoices.json` and `customers.json`.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_tax_rate_value")]
    pub default_tax_rate: f64,
    #[serde(default)]
    pub reports: ReportOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_tax_rate: Self::default_tax_rate_value(),
            reports: ReportOptions::default(),
        }
    }
}

impl Config {
    pub fn default_tax_rate_value() -> f64 {
        DEFAULT_TAX_RATE
    }

    /// Application home, `$BOOKKEEPER_HOME` or `~/.bookkeeper`.
    pub fn app_home() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        Self::app_home().join(DATA_DIR)
    }
}
